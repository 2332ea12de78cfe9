use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::{AppError, Result},
    models::{
        ApiResponse, CreateFavoriteRequest, Favorite, FavoriteResponse, UpdateFavoriteRequest,
    },
    queries::{favorite_queries, user_queries},
    AppState,
};

pub async fn get_favorites(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<FavoriteResponse>>>> {
    let favorites = favorite_queries::get_all(&state.db).await?;

    let user_ids: Vec<i32> = favorites.iter().map(|f| f.user_id).collect();
    let users = user_queries::find_public_by_ids(&state.db, &user_ids).await?;

    let response = favorites
        .into_iter()
        .map(|favorite| {
            let user = users.get(&favorite.user_id).cloned();
            FavoriteResponse { favorite, user }
        })
        .collect();

    Ok(Json(ApiResponse::new(response)))
}

/// Duplicate protection is a read-then-insert pre-check only; two concurrent
/// requests for the same user can both pass it.
pub async fn add_favorite(
    State(state): State<AppState>,
    Json(payload): Json<CreateFavoriteRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Favorite>>)> {
    if user_queries::find_public_by_id(&state.db, payload.user_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    if favorite_queries::find_by_user_id(&state.db, payload.user_id)
        .await?
        .is_some()
    {
        return Err(AppError::BadRequest(
            "User already in favorites".to_string(),
        ));
    }

    let favorite = favorite_queries::create_favorite(&state.db, &payload).await?;

    tracing::info!("User {} added to favorites", payload.user_id);

    Ok((StatusCode::CREATED, Json(ApiResponse::new(favorite))))
}

pub async fn update_favorite(
    State(state): State<AppState>,
    Json(payload): Json<UpdateFavoriteRequest>,
) -> Result<Json<ApiResponse<Favorite>>> {
    let favorite = favorite_queries::update_notes(&state.db, payload.id, payload.notes.as_deref())
        .await?
        .ok_or_else(|| AppError::NotFound("Favorite not found".to_string()))?;

    Ok(Json(ApiResponse::new(favorite)))
}

pub async fn delete_favorite(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Favorite>>> {
    let favorite = favorite_queries::delete_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Favorite not found".to_string()))?;

    tracing::info!("Favorite {} deleted", favorite.id);

    Ok(Json(ApiResponse::new(favorite)))
}

pub async fn delete_favorite_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<ApiResponse<Favorite>>> {
    let favorite = favorite_queries::delete_by_user_id(&state.db, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Favorite not found".to_string()))?;

    tracing::info!("Favorite for user {} deleted", user_id);

    Ok(Json(ApiResponse::new(favorite)))
}
