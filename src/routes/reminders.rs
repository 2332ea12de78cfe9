use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::{AppError, Result},
    models::{
        ApiResponse, CreateReminderRequest, Reminder, ReminderResponse, UpdateReminderRequest,
    },
    queries::{favorite_queries, reminder_queries, user_queries},
    AppState,
};

pub async fn get_reminders(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ReminderResponse>>>> {
    let reminders = reminder_queries::get_all(&state.db).await?;

    let user_ids: Vec<i32> = reminders.iter().map(|r| r.user_id).collect();
    let favorite_ids: Vec<i32> = reminders.iter().map(|r| r.favorite_id).collect();
    let users = user_queries::find_public_by_ids(&state.db, &user_ids).await?;
    let favorites = favorite_queries::find_by_ids(&state.db, &favorite_ids).await?;

    let response = reminders
        .into_iter()
        .map(|reminder| {
            let user = users.get(&reminder.user_id).cloned();
            let favorite = favorites.get(&reminder.favorite_id).cloned();
            ReminderResponse {
                reminder,
                user,
                favorite,
            }
        })
        .collect();

    Ok(Json(ApiResponse::new(response)))
}

/// The reminder is only created once the favorite is known to exist; its
/// user_id is copied from the favorite, not taken from the request.
pub async fn create_reminder(
    State(state): State<AppState>,
    Json(payload): Json<CreateReminderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Reminder>>)> {
    let favorite = favorite_queries::find_by_id(&state.db, payload.favorite_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Favorite not found".to_string()))?;

    let reminder = reminder_queries::create_reminder(&state.db, favorite.user_id, &payload).await?;

    tracing::info!(
        "Reminder {} created for favorite {}",
        reminder.id,
        favorite.id
    );

    Ok((StatusCode::CREATED, Json(ApiResponse::new(reminder))))
}

pub async fn update_reminder(
    State(state): State<AppState>,
    Json(payload): Json<UpdateReminderRequest>,
) -> Result<Json<ApiResponse<Reminder>>> {
    let reminder = reminder_queries::update_completed(&state.db, payload.id, payload.is_completed)
        .await?
        .ok_or_else(|| AppError::NotFound("Reminder not found".to_string()))?;

    Ok(Json(ApiResponse::new(reminder)))
}

pub async fn delete_reminder(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Reminder>>> {
    let reminder = reminder_queries::delete_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Reminder not found".to_string()))?;

    tracing::info!("Reminder {} deleted", reminder.id);

    Ok(Json(ApiResponse::new(reminder)))
}
