pub mod category_queries;
pub mod favorite_queries;
pub mod order_queries;
pub mod product_queries;
pub mod reminder_queries;
pub mod shopping_list_queries;
pub mod user_queries;
