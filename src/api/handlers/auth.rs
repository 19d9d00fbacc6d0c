use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::dtos::requests::{
    CompleteRegistrationRequest, ForgotPasswordRequest, OtpRequest, OtpVerifyRequest,
    ResetPasswordRequest,
};
use crate::api::dtos::responses::MessageResponse;
use crate::domain::models::{auth::LoginResponse, otp::Otp, user::{User, ROLE_ADMIN, ROLE_USER}};
use std::sync::Arc;
use argon2::{password_hash::{PasswordHasher, SaltString}, Argon2, PasswordHash, PasswordVerifier};
use rand::rngs::OsRng;
use rand::Rng;
use chrono::{Duration, Utc};
use tracing::info;

const OTP_TTL_MINUTES: i64 = 10;

#[derive(serde::Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.user_repo.find_by_email(&payload.email).await?
        .ok_or(AppError::Unauthorized("Invalid credentials".into()))?;

    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|_| AppError::Internal)?;

    Argon2::default().verify_password(payload.password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::Unauthorized("Invalid credentials".into()))?;

    let access_token = state.auth_service.issue_token(&user)?;

    info!("User logged in: {}", user.id);

    Ok(Json(LoginResponse { access_token }))
}

pub async fn send_otp(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<OtpRequest>,
) -> Result<impl IntoResponse, AppError> {
    let code = generate_code();

    state.mailer.send_otp_email(&payload.email, &code).await?;

    let otp = Otp::new(payload.email.clone(), state.auth_service.hash_code(&code));
    state.otp_repo.create(&otp).await?;

    info!("OTP issued for {}", payload.email);

    Ok(Json(MessageResponse { message: "OTP sent. Please verify.".to_string() }))
}

pub async fn verify_otp(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<OtpVerifyRequest>,
) -> Result<impl IntoResponse, AppError> {
    check_otp(&state, &payload.email, &payload.otp).await?;

    if state.user_repo.find_by_email(&payload.email).await?.is_some() {
        return Err(AppError::Conflict("User already exists".into()));
    }

    Ok(Json(MessageResponse {
        message: "OTP verified successfully, now complete your registration".to_string(),
    }))
}

pub async fn complete_registration(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CompleteRegistrationRequest>,
) -> Result<impl IntoResponse, AppError> {
    check_otp(&state, &payload.email, &payload.otp).await?;

    if state.user_repo.find_by_email(&payload.email).await?.is_some() {
        return Err(AppError::Conflict("User already exists".into()));
    }

    // First account in the system becomes the admin.
    let role = if state.user_repo.count().await? == 0 { ROLE_ADMIN } else { ROLE_USER };

    let password_hash = hash_password(&payload.password)?;
    let user = User::new(payload.name, payload.email, password_hash, role.to_string());
    let created = state.user_repo.create(&user).await?;

    info!("User registered: {} with role {}", created.id, created.role);

    Ok(Json(MessageResponse { message: format!("User registered as {}", role) }))
}

pub async fn forgot_password(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.user_repo.find_by_email(&payload.email).await?
        .ok_or(AppError::NotFound("Email not found".into()))?;

    let code = generate_code();
    state.mailer.send_otp_email(&payload.email, &code).await?;

    let otp = Otp::new(payload.email.clone(), state.auth_service.hash_code(&code));
    state.otp_repo.create(&otp).await?;

    info!("Password reset OTP issued for {}", payload.email);

    Ok(Json(MessageResponse { message: "OTP sent.".to_string() }))
}

pub async fn reset_password(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    check_otp(&state, &payload.email, &payload.otp).await?;

    let password_hash = hash_password(&payload.new_password)?;
    state.user_repo.update_password(&payload.email, &password_hash).await?;

    info!("Password reset for {}", payload.email);

    Ok(Json(MessageResponse { message: "Password successfully reset.".to_string() }))
}

fn generate_code() -> String {
    rand::thread_rng().gen_range(100_000..1_000_000).to_string()
}

fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AppError::Internal)?
        .to_string())
}

/// The newest code stored for the address must match and still be fresh.
async fn check_otp(state: &AppState, email: &str, code: &str) -> Result<(), AppError> {
    let record = state.otp_repo.find_latest_by_email(email).await?
        .ok_or(AppError::Unauthorized("Invalid or expired OTP".into()))?;

    if record.code_hash != state.auth_service.hash_code(code) {
        return Err(AppError::Unauthorized("Invalid or expired OTP".into()));
    }

    if record.created_at + Duration::minutes(OTP_TTL_MINUTES) < Utc::now() {
        return Err(AppError::Unauthorized("Invalid or expired OTP".into()));
    }

    Ok(())
}
