use crate::domain::{models::notification::Notification, ports::NotificationRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresNotificationRepo {
    pool: PgPool,
}

impl PostgresNotificationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PostgresNotificationRepo {
    async fn create(&self, notification: &Notification) -> Result<Notification, AppError> {
        sqlx::query_as::<_, Notification>(
            "INSERT INTO notifications (id, message, event_id, recipient_id, created_at) VALUES ($1, $2, $3, $4, $5) RETURNING id, message, event_id, recipient_id, created_at",
        )
            .bind(&notification.id)
            .bind(&notification.message)
            .bind(&notification.event_id)
            .bind(&notification.recipient_id)
            .bind(notification.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_recipient(&self, recipient_id: &str) -> Result<Vec<Notification>, AppError> {
        sqlx::query_as::<_, Notification>(
            "SELECT id, message, event_id, recipient_id, created_at FROM notifications WHERE recipient_id = $1 ORDER BY created_at DESC",
        )
            .bind(recipient_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_for_recipient(&self, id: &str, recipient_id: &str) -> Result<Option<Notification>, AppError> {
        sqlx::query_as::<_, Notification>(
            "SELECT id, message, event_id, recipient_id, created_at FROM notifications WHERE id = $1 AND recipient_id = $2",
        )
            .bind(id)
            .bind(recipient_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
