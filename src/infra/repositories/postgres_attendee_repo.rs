use crate::domain::{models::attendee::{Attendee, TicketTypeCount}, ports::AttendeeRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{PgPool, Row};

pub struct PostgresAttendeeRepo {
    pool: PgPool,
}

impl PostgresAttendeeRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendeeRepository for PostgresAttendeeRepo {
    async fn register(&self, attendee: &Attendee) -> Result<Attendee, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let result = sqlx::query("UPDATE ticket_types SET quantity = quantity - 1 WHERE id = $1 AND quantity > 0")
            .bind(&attendee.ticket_type_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::Forbidden("No seats available for this ticket type".to_string()));
        }

        let created = sqlx::query_as::<_, Attendee>(
            "INSERT INTO attendees (id, user_id, event_id, ticket_type_id, name, email, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING id, user_id, event_id, ticket_type_id, name, email, created_at",
        )
            .bind(&attendee.id)
            .bind(&attendee.user_id)
            .bind(&attendee.event_id)
            .bind(&attendee.ticket_type_id)
            .bind(&attendee.name)
            .bind(&attendee.email)
            .bind(attendee.created_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn remove(&self, attendee: &Attendee) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        sqlx::query("UPDATE ticket_types SET quantity = quantity + 1 WHERE id = $1")
            .bind(&attendee.ticket_type_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        let result = sqlx::query("DELETE FROM attendees WHERE id = $1")
            .bind(&attendee.id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Attendee not found".into()));
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Attendee>, AppError> {
        sqlx::query_as::<_, Attendee>(
            "SELECT id, user_id, event_id, ticket_type_id, name, email, created_at FROM attendees WHERE id = $1",
        )
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_user_and_event(&self, user_id: &str, event_id: &str) -> Result<Option<Attendee>, AppError> {
        sqlx::query_as::<_, Attendee>(
            "SELECT id, user_id, event_id, ticket_type_id, name, email, created_at FROM attendees WHERE user_id = $1 AND event_id = $2",
        )
            .bind(user_id)
            .bind(event_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Attendee>, AppError> {
        sqlx::query_as::<_, Attendee>(
            "SELECT id, user_id, event_id, ticket_type_id, name, email, created_at FROM attendees WHERE event_id = $1 ORDER BY created_at DESC",
        )
            .bind(event_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Attendee>, AppError> {
        sqlx::query_as::<_, Attendee>(
            "SELECT id, user_id, event_id, ticket_type_id, name, email, created_at FROM attendees WHERE user_id = $1 ORDER BY created_at DESC",
        )
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn count_by_event(&self, event_id: &str) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM attendees WHERE event_id = $1")
            .bind(event_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(row.get::<i64, _>("count"))
    }

    async fn count_per_ticket_type(&self, event_id: &str) -> Result<Vec<TicketTypeCount>, AppError> {
        sqlx::query_as::<_, TicketTypeCount>(
            "SELECT ticket_type_id, COUNT(*) as registered FROM attendees WHERE event_id = $1 GROUP BY ticket_type_id",
        )
            .bind(event_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
