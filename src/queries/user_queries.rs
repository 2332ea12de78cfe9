use std::collections::HashMap;

use sqlx::PgPool;

use crate::{
    error::Result,
    models::{PublicUser, RegisterRequest, User},
};

pub async fn create_user(pool: &PgPool, req: &RegisterRequest, password_hash: &str) -> Result<User> {
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (name, email, password, address, phone_number)
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(&req.name)
    .bind(&req.email)
    .bind(password_hash)
    .bind(&req.address)
    .bind(&req.phone_number)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

pub async fn find_public_by_id(pool: &PgPool, id: i32) -> Result<Option<PublicUser>> {
    let user = sqlx::query_as::<_, PublicUser>("SELECT id, name, email FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

/// Batch lookup for populate-style joins, keyed by user id.
pub async fn find_public_by_ids(pool: &PgPool, ids: &[i32]) -> Result<HashMap<i32, PublicUser>> {
    let users = sqlx::query_as::<_, PublicUser>(
        "SELECT id, name, email FROM users WHERE id = ANY($1)",
    )
    .bind(ids)
    .fetch_all(pool)
    .await?;

    Ok(users.into_iter().map(|u| (u.id, u)).collect())
}
