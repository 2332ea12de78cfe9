use std::collections::HashMap;

use sqlx::PgPool;

use crate::{
    error::Result,
    models::{Category, CreateCategoryRequest},
};

pub async fn get_all(pool: &PgPool) -> Result<Vec<Category>> {
    let categories =
        sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name ASC")
            .fetch_all(pool)
            .await?;

    Ok(categories)
}

pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Category>> {
    let category = sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE name = $1")
        .bind(name)
        .fetch_optional(pool)
        .await?;

    Ok(category)
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Category>> {
    let category = sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(category)
}

/// Batch lookup for populating product category references.
pub async fn find_by_ids(pool: &PgPool, ids: &[i32]) -> Result<HashMap<i32, Category>> {
    let categories =
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(pool)
            .await?;

    Ok(categories.into_iter().map(|c| (c.id, c)).collect())
}

pub async fn create_category(pool: &PgPool, req: &CreateCategoryRequest) -> Result<Category> {
    let category = sqlx::query_as::<_, Category>(
        "INSERT INTO categories (name, description, image) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(&req.name)
    .bind(&req.description)
    .bind(&req.image)
    .fetch_one(pool)
    .await?;

    Ok(category)
}
