use std::collections::HashMap;

use sqlx::PgPool;

use crate::{
    error::Result,
    models::{CreateFavoriteRequest, Favorite},
};

pub async fn get_all(pool: &PgPool) -> Result<Vec<Favorite>> {
    let favorites =
        sqlx::query_as::<_, Favorite>("SELECT * FROM favorites ORDER BY created_at DESC")
            .fetch_all(pool)
            .await?;

    Ok(favorites)
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Favorite>> {
    let favorite = sqlx::query_as::<_, Favorite>("SELECT * FROM favorites WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(favorite)
}

/// Batch lookup for populating reminder favorite references.
pub async fn find_by_ids(pool: &PgPool, ids: &[i32]) -> Result<HashMap<i32, Favorite>> {
    let favorites = sqlx::query_as::<_, Favorite>("SELECT * FROM favorites WHERE id = ANY($1)")
        .bind(ids)
        .fetch_all(pool)
        .await?;

    Ok(favorites.into_iter().map(|f| (f.id, f)).collect())
}

/// The pre-check behind "User already in favorites". Nothing at the storage
/// layer backs it up, so two concurrent inserts can both pass.
pub async fn find_by_user_id(pool: &PgPool, user_id: i32) -> Result<Option<Favorite>> {
    let favorite = sqlx::query_as::<_, Favorite>(
        "SELECT * FROM favorites WHERE user_id = $1 LIMIT 1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(favorite)
}

pub async fn create_favorite(pool: &PgPool, req: &CreateFavoriteRequest) -> Result<Favorite> {
    let favorite = sqlx::query_as::<_, Favorite>(
        "INSERT INTO favorites (user_id, notes) VALUES ($1, $2) RETURNING *",
    )
    .bind(req.user_id)
    .bind(&req.notes)
    .fetch_one(pool)
    .await?;

    Ok(favorite)
}

pub async fn update_notes(
    pool: &PgPool,
    id: i32,
    notes: Option<&str>,
) -> Result<Option<Favorite>> {
    let favorite = sqlx::query_as::<_, Favorite>(
        "UPDATE favorites SET notes = $1 WHERE id = $2 RETURNING *",
    )
    .bind(notes)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(favorite)
}

pub async fn delete_by_id(pool: &PgPool, id: i32) -> Result<Option<Favorite>> {
    let favorite =
        sqlx::query_as::<_, Favorite>("DELETE FROM favorites WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(pool)
            .await?;

    Ok(favorite)
}

pub async fn delete_by_user_id(pool: &PgPool, user_id: i32) -> Result<Option<Favorite>> {
    let favorite = sqlx::query_as::<_, Favorite>(
        "DELETE FROM favorites WHERE id = (SELECT id FROM favorites WHERE user_id = $1 LIMIT 1)
         RETURNING *",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(favorite)
}
