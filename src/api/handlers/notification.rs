use axum::{extract::{Path, State}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::{AdminUser, AuthUser};
use crate::api::dtos::{requests::SendNotificationRequest, responses::MessageResponse};
use crate::domain::models::notification::Notification;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn send_to_attendees(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(event_id): Path<String>,
    Json(payload): Json<SendNotificationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    let attendees = state.attendee_repo.list_by_event(&event.id).await?;

    for attendee in &attendees {
        let notification = Notification::new(
            payload.message.clone(),
            event.id.clone(),
            attendee.user_id.clone(),
        );
        state.notification_repo.create(&notification).await?;
        state.mailer.send_notification_email(&attendee.email, &payload.message).await?;
    }

    info!("Notification sent to {} attendees of event {}", attendees.len(), event.id);
    Ok(Json(MessageResponse { message: "Notification sent to all attendees.".to_string() }))
}

pub async fn list_own(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let notifications = state.notification_repo.list_by_recipient(&user.id).await?;
    Ok(Json(notifications))
}

pub async fn get_own(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let notification = state.notification_repo.find_for_recipient(&id, &user.id).await?
        .ok_or(AppError::NotFound("Notification not found or access denied".into()))?;
    Ok(Json(notification))
}
