use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Product;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ShoppingList {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ShoppingListItem {
    pub id: i32,
    pub shopping_list_id: i32,
    pub product_id: i32,
    pub quantity: i32,
}

#[derive(Debug, Deserialize)]
pub struct ShoppingListItemInput {
    pub product_id: i32,
    pub quantity: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct CreateShoppingListRequest {
    pub name: String,
    pub items: Vec<ShoppingListItemInput>,
    pub is_default: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct ShoppingListItemResponse {
    pub product: Option<Product>,
    pub quantity: i32,
}

#[derive(Debug, Serialize)]
pub struct ShoppingListResponse {
    #[serde(flatten)]
    pub list: ShoppingList,
    pub items: Vec<ShoppingListItemResponse>,
}
