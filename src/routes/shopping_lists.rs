use axum::{extract::State, http::StatusCode, Extension, Json};

use crate::{
    error::{AppError, Result},
    models::{
        ApiResponse, CreateShoppingListRequest, ShoppingListItemResponse, ShoppingListResponse,
    },
    queries::{product_queries, shopping_list_queries},
    utils::extractors::extract_user_id,
    utils::jwt::Claims,
    AppState,
};

pub async fn get_shopping_lists(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ApiResponse<Vec<ShoppingListResponse>>>> {
    let user_id = extract_user_id(&claims)?;

    let lists = shopping_list_queries::get_user_lists(&state.db, user_id).await?;

    let list_ids: Vec<i32> = lists.iter().map(|l| l.id).collect();
    let mut items_map = shopping_list_queries::get_items_for_lists(&state.db, &list_ids).await?;

    // Populate each item's product in one batch
    let product_ids: Vec<i32> = items_map
        .values()
        .flatten()
        .map(|item| item.product_id)
        .collect();
    let products: std::collections::HashMap<i32, _> =
        product_queries::find_by_ids(&state.db, &product_ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

    let response = lists
        .into_iter()
        .map(|list| {
            let items = items_map
                .remove(&list.id)
                .unwrap_or_default()
                .into_iter()
                .map(|item| ShoppingListItemResponse {
                    product: products.get(&item.product_id).cloned(),
                    quantity: item.quantity,
                })
                .collect();
            ShoppingListResponse { list, items }
        })
        .collect();

    Ok(Json(ApiResponse::new(response)))
}

pub async fn create_shopping_list(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateShoppingListRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ShoppingListResponse>>)> {
    let user_id = extract_user_id(&claims)?;

    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }

    let list = shopping_list_queries::create_list_with_items(&state.db, user_id, &payload).await?;

    let mut items_map = shopping_list_queries::get_items_for_lists(&state.db, &[list.id]).await?;
    let list_items = items_map.remove(&list.id).unwrap_or_default();

    let product_ids: Vec<i32> = list_items.iter().map(|i| i.product_id).collect();
    let products: std::collections::HashMap<i32, _> =
        product_queries::find_by_ids(&state.db, &product_ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

    let items = list_items
        .into_iter()
        .map(|item| ShoppingListItemResponse {
            product: products.get(&item.product_id).cloned(),
            quantity: item.quantity,
        })
        .collect();

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(ShoppingListResponse { list, items })),
    ))
}
