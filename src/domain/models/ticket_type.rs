use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct TicketType {
    pub id: String,
    pub event_id: String,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
}

impl TicketType {
    pub fn new(event_id: String, name: String, price: f64, quantity: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            event_id,
            name,
            price,
            quantity,
            created_at: Utc::now(),
        }
    }
}
