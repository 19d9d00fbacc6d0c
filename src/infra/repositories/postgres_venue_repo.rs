use crate::domain::{models::venue::Venue, ports::VenueRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

pub struct PostgresVenueRepo {
    pool: PgPool,
}

impl PostgresVenueRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VenueRepository for PostgresVenueRepo {
    async fn create(&self, venue: &Venue) -> Result<Venue, AppError> {
        sqlx::query_as::<_, Venue>(
            "INSERT INTO venues (id, name, location, created_at) VALUES ($1, $2, $3, $4) RETURNING id, name, location, created_at",
        )
            .bind(&venue.id)
            .bind(&venue.name)
            .bind(&venue.location)
            .bind(venue.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Venue>, AppError> {
        sqlx::query_as::<_, Venue>("SELECT id, name, location, created_at FROM venues WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_name_and_location(&self, name: &str, location: &str) -> Result<Option<Venue>, AppError> {
        sqlx::query_as::<_, Venue>(
            "SELECT id, name, location, created_at FROM venues WHERE name = $1 AND location = $2",
        )
            .bind(name)
            .bind(location)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Venue>, AppError> {
        sqlx::query_as::<_, Venue>("SELECT id, name, location, created_at FROM venues ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_available_on(&self, date: NaiveDate) -> Result<Vec<Venue>, AppError> {
        sqlx::query_as::<_, Venue>(
            "SELECT v.id, v.name, v.location, v.created_at FROM venues v
             WHERE NOT EXISTS (SELECT 1 FROM events e WHERE e.venue_id = v.id AND e.date = $1)
             ORDER BY v.name ASC",
        )
            .bind(date)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, venue: &Venue) -> Result<Venue, AppError> {
        sqlx::query_as::<_, Venue>(
            "UPDATE venues SET name = $1, location = $2 WHERE id = $3 RETURNING id, name, location, created_at",
        )
            .bind(&venue.name)
            .bind(&venue.location)
            .bind(&venue.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM venues WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Venue not found".into()));
        }
        Ok(())
    }
}
