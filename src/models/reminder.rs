use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Favorite, PublicUser};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Reminder {
    pub id: i32,
    pub user_id: i32,
    pub favorite_id: i32,
    pub message: String,
    pub date: DateTime<Utc>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateReminderRequest {
    pub favorite_id: i32,
    pub message: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateReminderRequest {
    pub id: i32,
    pub is_completed: bool,
}

#[derive(Debug, Serialize)]
pub struct ReminderResponse {
    #[serde(flatten)]
    pub reminder: Reminder,
    pub user: Option<PublicUser>,
    pub favorite: Option<Favorite>,
}
