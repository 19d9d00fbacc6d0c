use axum::{extract::{Path, State}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AdminUser;
use crate::api::dtos::requests::{CreateTicketTypeRequest, UpdateTicketTypeRequest};
use crate::domain::models::ticket_type::TicketType;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn create_ticket_type(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<CreateTicketTypeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&payload.event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    if payload.quantity < 0 {
        return Err(AppError::Validation("quantity must not be negative".into()));
    }

    let ticket_type = TicketType::new(event.id, payload.name, payload.price, payload.quantity);
    let created = state.ticket_type_repo.create(&ticket_type).await?;

    info!("Ticket type created: {} for event {}", created.id, created.event_id);
    Ok(Json(created))
}

pub async fn list_ticket_types(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let types = state.ticket_type_repo.list().await?;
    Ok(Json(types))
}

pub async fn list_by_event(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let types = state.ticket_type_repo.list_by_event(&event_id).await?;
    Ok(Json(types))
}

pub async fn update_ticket_type(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateTicketTypeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut ticket_type = state.ticket_type_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Ticket type not found".into()))?;

    if let Some(name) = payload.name { ticket_type.name = name; }
    if let Some(price) = payload.price { ticket_type.price = price; }
    if let Some(quantity) = payload.quantity {
        if quantity < 0 {
            return Err(AppError::Validation("quantity must not be negative".into()));
        }
        ticket_type.quantity = quantity;
    }

    let updated = state.ticket_type_repo.update(&ticket_type).await?;
    info!("Ticket type updated: {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_ticket_type(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.ticket_type_repo.delete(&id).await?;
    info!("Ticket type deleted: {}", id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
