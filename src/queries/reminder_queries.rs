use sqlx::PgPool;

use crate::{
    error::Result,
    models::{CreateReminderRequest, Reminder},
};

pub async fn get_all(pool: &PgPool) -> Result<Vec<Reminder>> {
    let reminders = sqlx::query_as::<_, Reminder>("SELECT * FROM reminders ORDER BY date ASC")
        .fetch_all(pool)
        .await?;

    Ok(reminders)
}

/// `user_id` is denormalized from the favorite at creation time, not taken
/// from the request.
pub async fn create_reminder(
    pool: &PgPool,
    user_id: i32,
    req: &CreateReminderRequest,
) -> Result<Reminder> {
    let reminder = sqlx::query_as::<_, Reminder>(
        "INSERT INTO reminders (user_id, favorite_id, message, date)
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(user_id)
    .bind(req.favorite_id)
    .bind(&req.message)
    .bind(req.date)
    .fetch_one(pool)
    .await?;

    Ok(reminder)
}

pub async fn update_completed(
    pool: &PgPool,
    id: i32,
    is_completed: bool,
) -> Result<Option<Reminder>> {
    let reminder = sqlx::query_as::<_, Reminder>(
        "UPDATE reminders SET is_completed = $1 WHERE id = $2 RETURNING *",
    )
    .bind(is_completed)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(reminder)
}

pub async fn delete_by_id(pool: &PgPool, id: i32) -> Result<Option<Reminder>> {
    let reminder =
        sqlx::query_as::<_, Reminder>("DELETE FROM reminders WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(pool)
            .await?;

    Ok(reminder)
}
