use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Attendee {
    pub id: String,
    pub user_id: String,
    pub event_id: String,
    pub ticket_type_id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl Attendee {
    pub fn new(user_id: String, event_id: String, ticket_type_id: String, name: String, email: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            event_id,
            ticket_type_id,
            name,
            email,
            created_at: Utc::now(),
        }
    }
}

/// Per-ticket-type registration tally for one event.
#[derive(Debug, FromRow, Clone)]
pub struct TicketTypeCount {
    pub ticket_type_id: String,
    pub registered: i64,
}
