use axum::{extract::{Query, State}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AdminUser;
use crate::api::dtos::requests::UpdateRoleRequest;
use crate::domain::models::user::{ROLE_ADMIN, ROLE_USER};
use crate::error::AppError;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

pub async fn list_users(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let users = state.user_repo.list().await?;
    let safe_users: Vec<_> = users.into_iter().map(|u| serde_json::json!({
        "id": u.id,
        "name": u.name,
        "email": u.email,
        "role": u.role,
    })).collect();

    Ok(Json(safe_users))
}

pub async fn update_role(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<UpdateRoleRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.role != ROLE_ADMIN && payload.role != ROLE_USER {
        return Err(AppError::Validation("Invalid role".into()));
    }

    let updated = state.user_repo.update_role(&payload.email, &payload.role).await?;

    info!("Role updated: {} is now {}", updated.email, updated.role);
    Ok(Json(updated))
}

pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let email = params.get("email")
        .ok_or(AppError::Validation("email query parameter required".into()))?;

    state.user_repo.delete_by_email(email).await?;

    info!("User deleted: {}", email);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
