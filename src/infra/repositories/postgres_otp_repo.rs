use crate::domain::{models::otp::Otp, ports::OtpRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresOtpRepo {
    pool: PgPool,
}

impl PostgresOtpRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OtpRepository for PostgresOtpRepo {
    async fn create(&self, otp: &Otp) -> Result<Otp, AppError> {
        sqlx::query_as::<_, Otp>(
            "INSERT INTO otps (id, email, code_hash, created_at) VALUES ($1, $2, $3, $4) RETURNING id, email, code_hash, created_at",
        )
            .bind(&otp.id)
            .bind(&otp.email)
            .bind(&otp.code_hash)
            .bind(otp.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_latest_by_email(&self, email: &str) -> Result<Option<Otp>, AppError> {
        sqlx::query_as::<_, Otp>(
            "SELECT id, email, code_hash, created_at FROM otps WHERE email = $1 ORDER BY created_at DESC LIMIT 1",
        )
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
