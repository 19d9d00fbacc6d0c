use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Notification {
    pub id: String,
    pub message: String,
    pub event_id: String,
    pub recipient_id: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(message: String, event_id: String, recipient_id: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            message,
            event_id,
            recipient_id,
            created_at: Utc::now(),
        }
    }
}
