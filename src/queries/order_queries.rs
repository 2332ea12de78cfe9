use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    error::Result,
    models::{
        CreateOrderRequest, Order, OrderItem, PaymentResult, UpdateOrderStatusRequest,
    },
};

/// Inserts the order row and its line-item snapshots. Stock has already been
/// decremented item by item before this runs; only the insert itself is
/// transactional.
pub async fn create_order_with_items(
    pool: &PgPool,
    user_id: i32,
    req: &CreateOrderRequest,
    estimated_delivery_time: DateTime<Utc>,
) -> Result<Order> {
    let mut tx = pool.begin().await?;

    let order = sqlx::query_as::<_, Order>(
        "INSERT INTO orders (user_id, street, city, state, zip_code, country, payment_method,
         total_price, delivery_fee, preferred_delivery_time, estimated_delivery_time)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
         RETURNING *",
    )
    .bind(user_id)
    .bind(&req.shipping_address.street)
    .bind(&req.shipping_address.city)
    .bind(&req.shipping_address.state)
    .bind(&req.shipping_address.zip_code)
    .bind(&req.shipping_address.country)
    .bind(&req.payment_method)
    .bind(req.total_price)
    .bind(req.delivery_fee)
    .bind(req.preferred_delivery_time)
    .bind(estimated_delivery_time)
    .fetch_one(&mut *tx)
    .await?;

    let product_ids: Vec<i32> = req.items.iter().map(|i| i.product_id).collect();
    let names: Vec<&str> = req.items.iter().map(|i| i.name.as_str()).collect();
    let prices: Vec<Decimal> = req.items.iter().map(|i| i.price).collect();
    let images: Vec<Option<&str>> = req.items.iter().map(|i| i.image.as_deref()).collect();
    let quantities: Vec<i32> = req.items.iter().map(|i| i.quantity).collect();

    sqlx::query(
        "INSERT INTO order_items (order_id, product_id, name, price, image, quantity)
         SELECT $1, unnest($2::int[]), unnest($3::varchar[]), unnest($4::decimal[]),
                unnest($5::varchar[]), unnest($6::int[])",
    )
    .bind(order.id)
    .bind(&product_ids)
    .bind(&names)
    .bind(&prices)
    .bind(&images)
    .bind(&quantities)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(order)
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Order>> {
    let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(order)
}

pub async fn get_all_orders(pool: &PgPool) -> Result<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>("SELECT * FROM orders ORDER BY created_at DESC")
        .fetch_all(pool)
        .await?;

    Ok(orders)
}

pub async fn get_user_orders(pool: &PgPool, user_id: i32) -> Result<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(
        "SELECT * FROM orders WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(orders)
}

pub async fn get_assigned_orders(pool: &PgPool, delivery_person_id: i32) -> Result<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(
        "SELECT * FROM orders WHERE delivery_person_id = $1 ORDER BY created_at DESC",
    )
    .bind(delivery_person_id)
    .fetch_all(pool)
    .await?;

    Ok(orders)
}

pub async fn get_items_for_orders(
    pool: &PgPool,
    order_ids: &[i32],
) -> Result<HashMap<i32, Vec<OrderItem>>> {
    let items = sqlx::query_as::<_, OrderItem>(
        "SELECT * FROM order_items WHERE order_id = ANY($1) ORDER BY id ASC",
    )
    .bind(order_ids)
    .fetch_all(pool)
    .await?;

    let mut items_map: HashMap<i32, Vec<OrderItem>> = HashMap::new();
    for item in items {
        items_map.entry(item.order_id).or_default().push(item);
    }

    Ok(items_map)
}

/// Marks the order paid with the submitted payment result. The amount is
/// stored as received; nothing checks it against the order total.
pub async fn mark_paid(
    pool: &PgPool,
    order_id: i32,
    payment: &PaymentResult,
) -> Result<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(
        "UPDATE orders SET is_paid = TRUE, paid_at = NOW(), payment_id = $1,
         payment_status = $2, payment_update_time = $3, payment_email = $4,
         updated_at = NOW()
         WHERE id = $5 RETURNING *",
    )
    .bind(&payment.id)
    .bind(&payment.status)
    .bind(&payment.update_time)
    .bind(&payment.email_address)
    .bind(order_id)
    .fetch_optional(pool)
    .await?;

    Ok(order)
}

/// Applies whatever status the caller submitted. The pending → processing →
/// shipped → delivered progression is documentation, not a constraint.
pub async fn update_status(
    pool: &PgPool,
    order_id: i32,
    req: &UpdateOrderStatusRequest,
) -> Result<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(
        "UPDATE orders SET status = $1,
         delivery_person_id = COALESCE($2, delivery_person_id),
         actual_delivery_time = COALESCE($3, actual_delivery_time),
         updated_at = NOW()
         WHERE id = $4 RETURNING *",
    )
    .bind(req.status)
    .bind(req.delivery_person_id)
    .bind(req.actual_delivery_time)
    .bind(order_id)
    .fetch_optional(pool)
    .await?;

    Ok(order)
}
