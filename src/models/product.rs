use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Category;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub images: Vec<String>,
    pub category_id: i32,
    pub stock_quantity: i32,
    pub unit: String,
    pub is_popular: bool,
    pub discount_percentage: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub enum SortBy {
    #[serde(rename = "price-asc")]
    PriceAsc,
    #[serde(rename = "price-desc")]
    PriceDesc,
    #[serde(rename = "newest")]
    Newest,
    #[serde(rename = "popular")]
    Popular,
}

#[derive(Debug, Deserialize)]
pub struct ProductQuery {
    pub category: Option<i32>,
    pub search: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub sort: Option<SortBy>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub images: Option<Vec<String>>,
    pub category_id: i32,
    pub stock_quantity: Option<i32>,
    pub unit: Option<String>,
    pub is_popular: Option<bool>,
    pub discount_percentage: Option<Decimal>,
}

/// Product with its category reference populated.
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    #[serde(flatten)]
    pub product: Product,
    pub category: Option<Category>,
}
