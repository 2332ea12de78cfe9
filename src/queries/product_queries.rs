use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::{
    error::Result,
    models::{CreateProductRequest, Product, ProductQuery, SortBy},
};

const DEFAULT_PAGE_SIZE: i64 = 50;
const MAX_PAGE_SIZE: i64 = 100;

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(product)
}

pub async fn find_by_ids(pool: &PgPool, ids: &[i32]) -> Result<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = ANY($1)")
        .bind(ids)
        .fetch_all(pool)
        .await?;

    Ok(products)
}

pub async fn search_products(pool: &PgPool, params: &ProductQuery) -> Result<Vec<Product>> {
    let mut query: QueryBuilder<Postgres> = QueryBuilder::new("SELECT * FROM products WHERE 1=1");

    // category filter
    if let Some(category) = params.category {
        query.push(" AND category_id = ");
        query.push_bind(category);
    }

    // name search
    if let Some(ref search) = params.search {
        query.push(" AND name ILIKE ");
        query.push_bind(format!("%{}%", search));
    }

    // price range
    if let Some(min_price) = params.min_price {
        query.push(" AND price >= ");
        query.push_bind(min_price);
    }

    if let Some(max_price) = params.max_price {
        query.push(" AND price <= ");
        query.push_bind(max_price);
    }

    // sort
    match params.sort {
        Some(SortBy::PriceAsc) => {
            query.push(" ORDER BY price ASC");
        }
        Some(SortBy::PriceDesc) => {
            query.push(" ORDER BY price DESC");
        }
        Some(SortBy::Popular) => {
            query.push(" ORDER BY is_popular DESC, created_at DESC");
        }
        Some(SortBy::Newest) | None => {
            query.push(" ORDER BY created_at DESC");
        }
    }

    let limit = params.limit.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);
    query.push(" LIMIT ");
    query.push_bind(limit);

    let products = query.build_query_as::<Product>().fetch_all(pool).await?;

    Ok(products)
}

pub async fn create_product(pool: &PgPool, req: &CreateProductRequest) -> Result<Product> {
    let product = sqlx::query_as::<_, Product>(
        "INSERT INTO products (name, description, price, images, category_id, stock_quantity,
         unit, is_popular, discount_percentage)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
         RETURNING *",
    )
    .bind(&req.name)
    .bind(&req.description)
    .bind(req.price)
    .bind(req.images.clone().unwrap_or_default())
    .bind(req.category_id)
    .bind(req.stock_quantity.unwrap_or(0))
    .bind(req.unit.as_deref().unwrap_or("piece"))
    .bind(req.is_popular.unwrap_or(false))
    .bind(req.discount_percentage.unwrap_or_default())
    .fetch_one(pool)
    .await?;

    Ok(product)
}

/// Persists a single product's stock decrement on its own, outside any
/// transaction. Order creation calls this per item as it walks the cart, so a
/// later item failing leaves earlier decrements in place.
pub async fn decrement_stock(pool: &PgPool, id: i32, quantity: i32) -> Result<()> {
    sqlx::query(
        "UPDATE products SET stock_quantity = stock_quantity - $1, updated_at = NOW()
         WHERE id = $2",
    )
    .bind(quantity)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(())
}
