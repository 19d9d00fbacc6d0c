use crate::domain::{models::event::Event, ports::{EventFilter, EventRepository}};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

pub struct PostgresEventRepo {
    pool: PgPool,
}

impl PostgresEventRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PostgresEventRepo {
    async fn create(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            "INSERT INTO events (id, title, description, date, time, venue_id, banner_url, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING id, title, description, date, time, venue_id, banner_url, created_at",
        )
            .bind(&event.id)
            .bind(&event.title)
            .bind(&event.description)
            .bind(event.date)
            .bind(&event.time)
            .bind(&event.venue_id)
            .bind(&event.banner_url)
            .bind(event.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError> {
        sqlx::query_as::<_, Event>(
            "SELECT id, title, description, date, time, venue_id, banner_url, created_at FROM events WHERE id = $1",
        )
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_venue_and_date(&self, venue_id: &str, date: NaiveDate) -> Result<Option<Event>, AppError> {
        sqlx::query_as::<_, Event>(
            "SELECT id, title, description, date, time, venue_id, banner_url, created_at FROM events WHERE venue_id = $1 AND date = $2 LIMIT 1",
        )
            .bind(venue_id)
            .bind(date)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self, filter: &EventFilter) -> Result<Vec<Event>, AppError> {
        sqlx::query_as::<_, Event>(
            "SELECT e.id, e.title, e.description, e.date, e.time, e.venue_id, e.banner_url, e.created_at
             FROM events e JOIN venues v ON v.id = e.venue_id
             WHERE ($1::date IS NULL OR e.date = $1)
               AND ($2::text IS NULL OR e.venue_id = $2)
               AND ($3::text IS NULL OR v.location ILIKE '%' || $3 || '%')
             ORDER BY e.date ASC, e.time ASC",
        )
            .bind(filter.date)
            .bind(&filter.venue_id)
            .bind(&filter.location)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            "UPDATE events SET title = $1, description = $2, date = $3, time = $4, venue_id = $5, banner_url = $6
             WHERE id = $7
             RETURNING id, title, description, date, time, venue_id, banner_url, created_at",
        )
            .bind(&event.title)
            .bind(&event.description)
            .bind(event.date)
            .bind(&event.time)
            .bind(&event.venue_id)
            .bind(&event.banner_url)
            .bind(&event.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Event not found".into()));
        }
        Ok(())
    }
}
