use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::PublicUser;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Favorite {
    pub id: i32,
    pub user_id: i32,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateFavoriteRequest {
    pub user_id: i32,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateFavoriteRequest {
    pub id: i32,
    pub notes: Option<String>,
}

/// Favorite with its user reference populated.
#[derive(Debug, Serialize)]
pub struct FavoriteResponse {
    #[serde(flatten)]
    pub favorite: Favorite,
    pub user: Option<PublicUser>,
}
