mod admin;
mod categories;
mod favorites;
mod health;
mod login;
mod orders;
mod products;
mod register;
mod reminders;
mod shopping_lists;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::AppState;

pub fn create_router() -> Router<AppState> {
    // POST /api/products and /api/categories share their path with public
    // GETs, so the admin check lives inside those handlers.
    let public = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/api/register", post(register::register_user))
        .route("/api/login", post(login::login_user))
        .route(
            "/api/products",
            get(products::search_products).post(admin::create_product),
        )
        .route("/api/products/:id", get(products::get_product))
        .route(
            "/api/categories",
            get(categories::get_categories).post(admin::create_category),
        )
        .route("/api/orders/:id/status", put(admin::update_order_status))
        .route(
            "/api/favorites",
            get(favorites::get_favorites)
                .post(favorites::add_favorite)
                .put(favorites::update_favorite),
        )
        .route("/api/favorites/:id", delete(favorites::delete_favorite))
        .route(
            "/api/favorites/user/:user_id",
            delete(favorites::delete_favorite_by_user),
        )
        .route(
            "/api/reminders",
            get(reminders::get_reminders)
                .post(reminders::create_reminder)
                .put(reminders::update_reminder),
        )
        .route("/api/reminders/:id", delete(reminders::delete_reminder));

    let protected = Router::new()
        .route(
            "/api/orders",
            get(orders::get_orders).post(orders::create_order),
        )
        .route("/api/orders/:id", get(orders::get_order))
        .route("/api/orders/:id/pay", put(orders::pay_order))
        .route(
            "/api/shopping-lists",
            get(shopping_lists::get_shopping_lists).post(shopping_lists::create_shopping_list),
        )
        .route_layer(middleware::from_fn(crate::middleware::auth_middleware));

    public.merge(protected)
}
