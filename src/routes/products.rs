use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::{
    error::{AppError, Result},
    models::{ApiResponse, ProductQuery, ProductResponse},
    queries::{category_queries, product_queries},
    AppState,
};

pub async fn search_products(
    State(state): State<AppState>,
    Query(params): Query<ProductQuery>,
) -> Result<Json<ApiResponse<Vec<ProductResponse>>>> {
    let products = product_queries::search_products(&state.db, &params).await?;

    // Populate category references in one batch
    let category_ids: Vec<i32> = products.iter().map(|p| p.category_id).collect();
    let categories = category_queries::find_by_ids(&state.db, &category_ids).await?;

    let response: Vec<ProductResponse> = products
        .into_iter()
        .map(|product| {
            let category = categories.get(&product.category_id).cloned();
            ProductResponse { product, category }
        })
        .collect();

    Ok(Json(ApiResponse::new(response)))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ProductResponse>>> {
    let product = product_queries::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    let category = category_queries::find_by_id(&state.db, product.category_id).await?;

    Ok(Json(ApiResponse::new(ProductResponse { product, category })))
}
