use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{Duration, Utc};

use crate::{
    error::{AppError, Result},
    models::{
        ApiResponse, CreateOrderRequest, Order, OrderItemInput, OrderResponse, PayOrderRequest,
        Product, UserRole,
    },
    queries::{order_queries, product_queries, user_queries},
    utils::extractors::extract_user_id,
    utils::jwt::Claims,
    AppState,
};

const ESTIMATED_DELIVERY_HOURS: i64 = 2;

pub async fn create_order(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<OrderResponse>>)> {
    let user_id = extract_user_id(&claims)?;

    validate_order_request(&payload)?;

    // Walk the cart item by item. Each product's stock is checked and then
    // persisted immediately, so a failure further down the list leaves the
    // earlier decrements in place with no order created.
    for item in &payload.items {
        let product = product_queries::find_by_id(&state.db, item.product_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", item.name)))?;

        ensure_stock(&product, item)?;

        product_queries::decrement_stock(&state.db, product.id, item.quantity).await?;
    }

    let estimated_delivery_time = Utc::now() + Duration::hours(ESTIMATED_DELIVERY_HOURS);

    let order =
        order_queries::create_order_with_items(&state.db, user_id, &payload, estimated_delivery_time)
            .await?;

    tracing::info!("Order {} created for user {}", order.id, user_id);

    let items_map = order_queries::get_items_for_orders(&state.db, &[order.id]).await?;
    let items = items_map.into_values().next().unwrap_or_default();

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(OrderResponse {
            order,
            items,
            user: None,
            delivery_person: None,
        })),
    ))
}

pub async fn get_orders(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ApiResponse<Vec<OrderResponse>>>> {
    let user_id = extract_user_id(&claims)?;

    let orders = match claims.role {
        UserRole::Admin => order_queries::get_all_orders(&state.db).await?,
        UserRole::Delivery => order_queries::get_assigned_orders(&state.db, user_id).await?,
        UserRole::User => order_queries::get_user_orders(&state.db, user_id).await?,
    };

    let order_ids: Vec<i32> = orders.iter().map(|o| o.id).collect();
    let mut items_map = order_queries::get_items_for_orders(&state.db, &order_ids).await?;

    // Admins see who placed the order and who delivers it
    let users = if claims.role == UserRole::Admin {
        let mut user_ids: Vec<i32> = orders.iter().map(|o| o.user_id).collect();
        user_ids.extend(orders.iter().filter_map(|o| o.delivery_person_id));
        user_queries::find_public_by_ids(&state.db, &user_ids).await?
    } else {
        Default::default()
    };

    let response = orders
        .into_iter()
        .map(|order| {
            let items = items_map.remove(&order.id).unwrap_or_default();
            let user = users.get(&order.user_id).cloned();
            let delivery_person = order
                .delivery_person_id
                .and_then(|id| users.get(&id).cloned());
            OrderResponse {
                order,
                items,
                user,
                delivery_person,
            }
        })
        .collect();

    Ok(Json(ApiResponse::new(response)))
}

pub async fn get_order(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<OrderResponse>>> {
    let user_id = extract_user_id(&claims)?;

    let order = find_visible_order(&state, &claims, user_id, id).await?;

    let mut items_map = order_queries::get_items_for_orders(&state.db, &[order.id]).await?;
    let items = items_map.remove(&order.id).unwrap_or_default();

    Ok(Json(ApiResponse::new(OrderResponse {
        order,
        items,
        user: None,
        delivery_person: None,
    })))
}

pub async fn pay_order(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i32>,
    Json(payload): Json<PayOrderRequest>,
) -> Result<Json<ApiResponse<OrderResponse>>> {
    let user_id = extract_user_id(&claims)?;

    // Visibility check doubles as the ownership check
    find_visible_order(&state, &claims, user_id, id).await?;

    let order = order_queries::mark_paid(&state.db, id, &payload.payment_result)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;

    tracing::info!("Order {} marked paid ({})", order.id, payload.payment_result.id);

    let mut items_map = order_queries::get_items_for_orders(&state.db, &[order.id]).await?;
    let items = items_map.remove(&order.id).unwrap_or_default();

    Ok(Json(ApiResponse::new(OrderResponse {
        order,
        items,
        user: None,
        delivery_person: None,
    })))
}

async fn find_visible_order(
    state: &AppState,
    claims: &Claims,
    user_id: i32,
    order_id: i32,
) -> Result<Order> {
    let order = order_queries::find_by_id(&state.db, order_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;

    if claims.role != UserRole::Admin && order.user_id != user_id {
        return Err(AppError::NotFound("Order not found".to_string()));
    }

    Ok(order)
}

fn validate_order_request(payload: &CreateOrderRequest) -> Result<()> {
    if payload.items.is_empty() {
        return Err(AppError::BadRequest("Cart is empty".to_string()));
    }

    for item in &payload.items {
        if item.quantity <= 0 {
            return Err(AppError::BadRequest(format!(
                "Invalid quantity for {}",
                item.name
            )));
        }
    }

    let address = &payload.shipping_address;
    if [
        &address.street,
        &address.city,
        &address.state,
        &address.zip_code,
        &address.country,
    ]
    .iter()
    .any(|field| field.trim().is_empty())
    {
        return Err(AppError::BadRequest(
            "Shipping address is incomplete".to_string(),
        ));
    }

    Ok(())
}

fn ensure_stock(product: &Product, item: &OrderItemInput) -> Result<()> {
    if product.stock_quantity < item.quantity {
        return Err(AppError::BadRequest(format!(
            "Not enough stock for {}. Available: {}",
            product.name, product.stock_quantity
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShippingAddress;
    use rust_decimal::dec;

    fn product(stock: i32) -> Product {
        Product {
            id: 1,
            name: "Apples".to_string(),
            description: "Crisp red apples".to_string(),
            price: dec!(2.50),
            images: vec![],
            category_id: 1,
            stock_quantity: stock,
            unit: "kg".to_string(),
            is_popular: false,
            discount_percentage: dec!(0),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn item(quantity: i32) -> OrderItemInput {
        OrderItemInput {
            product_id: 1,
            name: "Apples".to_string(),
            price: dec!(2.50),
            image: None,
            quantity,
        }
    }

    fn order_request(items: Vec<OrderItemInput>) -> CreateOrderRequest {
        CreateOrderRequest {
            items,
            shipping_address: ShippingAddress {
                street: "1 Main St".to_string(),
                city: "Springfield".to_string(),
                state: "IL".to_string(),
                zip_code: "62701".to_string(),
                country: "USA".to_string(),
            },
            payment_method: "card".to_string(),
            total_price: dec!(10.99),
            delivery_fee: dec!(5.99),
            preferred_delivery_time: None,
        }
    }

    #[test]
    fn test_stock_covers_requested_quantity() {
        assert!(ensure_stock(&product(5), &item(5)).is_ok());
        assert!(ensure_stock(&product(5), &item(3)).is_ok());
    }

    #[test]
    fn test_insufficient_stock_names_product() {
        let err = ensure_stock(&product(2), &item(3)).unwrap_err();
        match err {
            AppError::BadRequest(msg) => {
                assert!(msg.contains("Apples"));
                assert!(msg.contains("Available: 2"));
            }
            other => panic!("expected BadRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_cart_rejected() {
        assert!(validate_order_request(&order_request(vec![])).is_err());
    }

    #[test]
    fn test_non_positive_quantity_rejected() {
        assert!(validate_order_request(&order_request(vec![item(0)])).is_err());
        assert!(validate_order_request(&order_request(vec![item(-1)])).is_err());
    }

    #[test]
    fn test_incomplete_address_rejected() {
        let mut request = order_request(vec![item(1)]);
        request.shipping_address.city = "  ".to_string();
        assert!(validate_order_request(&request).is_err());
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(validate_order_request(&order_request(vec![item(2)])).is_ok());
    }
}
