use crate::domain::{models::ticket_type::TicketType, ports::TicketTypeRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresTicketTypeRepo {
    pool: PgPool,
}

impl PostgresTicketTypeRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TicketTypeRepository for PostgresTicketTypeRepo {
    async fn create(&self, ticket_type: &TicketType) -> Result<TicketType, AppError> {
        sqlx::query_as::<_, TicketType>(
            "INSERT INTO ticket_types (id, event_id, name, price, quantity, created_at) VALUES ($1, $2, $3, $4, $5, $6) RETURNING id, event_id, name, price, quantity, created_at",
        )
            .bind(&ticket_type.id)
            .bind(&ticket_type.event_id)
            .bind(&ticket_type.name)
            .bind(ticket_type.price)
            .bind(ticket_type.quantity)
            .bind(ticket_type.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<TicketType>, AppError> {
        sqlx::query_as::<_, TicketType>(
            "SELECT id, event_id, name, price, quantity, created_at FROM ticket_types WHERE id = $1",
        )
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<TicketType>, AppError> {
        sqlx::query_as::<_, TicketType>(
            "SELECT id, event_id, name, price, quantity, created_at FROM ticket_types ORDER BY created_at ASC",
        )
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_event(&self, event_id: &str) -> Result<Vec<TicketType>, AppError> {
        sqlx::query_as::<_, TicketType>(
            "SELECT id, event_id, name, price, quantity, created_at FROM ticket_types WHERE event_id = $1 ORDER BY price ASC",
        )
            .bind(event_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, ticket_type: &TicketType) -> Result<TicketType, AppError> {
        sqlx::query_as::<_, TicketType>(
            "UPDATE ticket_types SET name = $1, price = $2, quantity = $3 WHERE id = $4 RETURNING id, event_id, name, price, quantity, created_at",
        )
            .bind(&ticket_type.name)
            .bind(ticket_type.price)
            .bind(ticket_type.quantity)
            .bind(&ticket_type.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM ticket_types WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Ticket type not found".into()));
        }
        Ok(())
    }
}
