use std::collections::HashMap;

use sqlx::PgPool;

use crate::{
    error::Result,
    models::{CreateShoppingListRequest, ShoppingList, ShoppingListItem},
};

pub async fn get_user_lists(pool: &PgPool, user_id: i32) -> Result<Vec<ShoppingList>> {
    let lists = sqlx::query_as::<_, ShoppingList>(
        "SELECT * FROM shopping_lists WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(lists)
}

pub async fn get_items_for_lists(
    pool: &PgPool,
    list_ids: &[i32],
) -> Result<HashMap<i32, Vec<ShoppingListItem>>> {
    let items = sqlx::query_as::<_, ShoppingListItem>(
        "SELECT * FROM shopping_list_items WHERE shopping_list_id = ANY($1) ORDER BY id ASC",
    )
    .bind(list_ids)
    .fetch_all(pool)
    .await?;

    let mut items_map: HashMap<i32, Vec<ShoppingListItem>> = HashMap::new();
    for item in items {
        items_map.entry(item.shopping_list_id).or_default().push(item);
    }

    Ok(items_map)
}

pub async fn create_list_with_items(
    pool: &PgPool,
    user_id: i32,
    req: &CreateShoppingListRequest,
) -> Result<ShoppingList> {
    let mut tx = pool.begin().await?;

    let list = sqlx::query_as::<_, ShoppingList>(
        "INSERT INTO shopping_lists (user_id, name, is_default)
         VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(user_id)
    .bind(&req.name)
    .bind(req.is_default.unwrap_or(false))
    .fetch_one(&mut *tx)
    .await?;

    if !req.items.is_empty() {
        let product_ids: Vec<i32> = req.items.iter().map(|i| i.product_id).collect();
        let quantities: Vec<i32> = req.items.iter().map(|i| i.quantity.unwrap_or(1)).collect();

        sqlx::query(
            "INSERT INTO shopping_list_items (shopping_list_id, product_id, quantity)
             SELECT $1, unnest($2::int[]), unnest($3::int[])",
        )
        .bind(list.id)
        .bind(&product_ids)
        .bind(&quantities)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(list)
}
