use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: String, // "HH:MM"
    pub venue_id: String,
    pub banner_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub struct NewEventParams {
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: String,
    pub venue_id: String,
    pub banner_url: Option<String>,
}

impl Event {
    pub fn new(params: NewEventParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: params.title,
            description: params.description,
            date: params.date,
            time: params.time,
            venue_id: params.venue_id,
            banner_url: params.banner_url,
            created_at: Utc::now(),
        }
    }
}
