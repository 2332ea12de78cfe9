use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};

use crate::{
    error::{AppError, Result},
    models::{
        ApiResponse, Category, CreateCategoryRequest, CreateProductRequest, Order,
        ProductResponse, UpdateOrderStatusRequest,
    },
    queries::{category_queries, order_queries, product_queries},
    utils::extractors::require_admin,
    AppState,
};

pub async fn create_product(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ProductResponse>>)> {
    require_admin(&headers)?;

    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }

    let category = category_queries::find_by_id(&state.db, payload.category_id)
        .await?
        .ok_or_else(|| AppError::BadRequest("Unknown category".to_string()))?;

    let product = product_queries::create_product(&state.db, &payload).await?;

    tracing::info!("Product {} ({}) created", product.id, product.name);

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(ProductResponse {
            product,
            category: Some(category),
        })),
    ))
}

pub async fn create_category(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Category>>)> {
    require_admin(&headers)?;

    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }

    if category_queries::find_by_name(&state.db, &payload.name)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(format!(
            "Category {} already exists",
            payload.name
        )));
    }

    let category = category_queries::create_category(&state.db, &payload).await?;

    tracing::info!("Category {} ({}) created", category.id, category.name);

    Ok((StatusCode::CREATED, Json(ApiResponse::new(category))))
}

/// Accepts whatever status the admin submits; the lifecycle diagram is not
/// enforced here or anywhere else.
pub async fn update_order_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> Result<Json<ApiResponse<Order>>> {
    require_admin(&headers)?;

    let order = order_queries::update_status(&state.db, id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;

    tracing::info!("Order {} status set to {:?}", order.id, order.status);

    Ok(Json(ApiResponse::new(order)))
}
