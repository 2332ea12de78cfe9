use axum::{extract::State, Json};

use crate::{
    error::Result,
    models::{ApiResponse, Category},
    queries::category_queries,
    AppState,
};

pub async fn get_categories(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Category>>>> {
    let categories = category_queries::get_all(&state.db).await?;

    Ok(Json(ApiResponse::new(categories)))
}
