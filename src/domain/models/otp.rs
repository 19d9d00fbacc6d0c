use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

// Codes are persisted hashed; the raw digits only ever travel by email.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Otp {
    pub id: String,
    pub email: String,
    pub code_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Otp {
    pub fn new(email: String, code_hash: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email,
            code_hash,
            created_at: Utc::now(),
        }
    }
}
