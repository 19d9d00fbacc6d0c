use axum::{extract::{Path, Query, State}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AdminUser;
use crate::api::dtos::requests::{CreateVenueRequest, UpdateVenueRequest};
use crate::domain::models::venue::Venue;
use crate::error::AppError;
use std::collections::HashMap;
use std::sync::Arc;
use chrono::NaiveDate;
use tracing::info;

pub async fn create_venue(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<CreateVenueRequest>,
) -> Result<impl IntoResponse, AppError> {
    if state.venue_repo.find_by_name_and_location(&payload.name, &payload.location).await?.is_some() {
        return Err(AppError::Conflict("Venue with this name and location already exists".into()));
    }

    let venue = Venue::new(payload.name, payload.location);
    let created = state.venue_repo.create(&venue).await?;

    info!("Venue created: {}", created.id);
    Ok(Json(created))
}

pub async fn list_venues(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let venues = state.venue_repo.list().await?;
    Ok(Json(venues))
}

pub async fn available_venues(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let date_str = params.get("date").ok_or(AppError::Validation("date required".into()))?;
    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format (YYYY-MM-DD)".into()))?;

    let venues = state.venue_repo.list_available_on(date).await?;
    Ok(Json(venues))
}

pub async fn update_venue(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateVenueRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut venue = state.venue_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Venue not found".into()))?;

    if let Some(name) = payload.name { venue.name = name; }
    if let Some(location) = payload.location { venue.location = location; }

    let updated = state.venue_repo.update(&venue).await?;
    info!("Venue updated: {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_venue(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.venue_repo.delete(&id).await?;
    info!("Venue deleted: {}", id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
