use axum::{extract::{Path, Query, State}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AdminUser;
use crate::api::dtos::{
    requests::{CreateEventRequest, UpdateEventRequest},
    responses::{EventDetail, EventWithStats, MessageResponse},
};
use crate::domain::models::event::{Event, NewEventParams};
use crate::domain::ports::EventFilter;
use crate::domain::services::capacity::{availability, event_capacity, open_types};
use crate::error::AppError;
use std::collections::HashMap;
use std::sync::Arc;
use chrono::{NaiveDate, NaiveTime};
use tracing::info;

fn parse_date(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format (YYYY-MM-DD)".into()))
}

fn validate_time(value: &str) -> Result<(), AppError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map(|_| ())
        .map_err(|_| AppError::Validation("Invalid time format (HH:MM)".into()))
}

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let venue = state.venue_repo.find_by_id(&payload.venue_id).await?
        .ok_or(AppError::NotFound("Venue not found".into()))?;

    let date = parse_date(&payload.date)?;
    validate_time(&payload.time)?;

    if state.event_repo.find_by_venue_and_date(&venue.id, date).await?.is_some() {
        return Err(AppError::Conflict("This venue is already booked on the selected date.".into()));
    }

    let event = Event::new(NewEventParams {
        title: payload.title,
        description: payload.description,
        date,
        time: payload.time,
        venue_id: venue.id,
        banner_url: payload.banner_url,
    });

    let created = state.event_repo.create(&event).await?;
    info!("Event created: {} on {}", created.id, created.date);
    Ok(Json(created))
}

pub async fn list_events(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let mut filter = EventFilter::default();
    if let Some(date_str) = params.get("date") {
        filter.date = Some(parse_date(date_str)?);
    }
    filter.venue_id = params.get("venue_id").cloned();
    filter.location = params.get("location").cloned();

    let events = state.event_repo.list(&filter).await?;

    let mut results = Vec::with_capacity(events.len());
    for event in events {
        let venue = state.venue_repo.find_by_id(&event.venue_id).await?;
        let types = state.ticket_type_repo.list_by_event(&event.id).await?;
        let counts: HashMap<String, i64> = state.attendee_repo.count_per_ticket_type(&event.id).await?
            .into_iter()
            .map(|c| (c.ticket_type_id, c.registered))
            .collect();
        let registered = state.attendee_repo.count_by_event(&event.id).await?;

        let annotated = availability(types, &counts);
        let capacity = event_capacity(&annotated, registered);

        results.push(EventWithStats {
            event,
            venue,
            registered_count: capacity.registered_count,
            remaining_tickets: capacity.remaining_tickets,
            ticket_types: open_types(annotated),
        });
    }

    Ok(Json(results))
}

pub async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    let venue = state.venue_repo.find_by_id(&event.venue_id).await?;
    let ticket_types = state.ticket_type_repo.list_by_event(&event.id).await?;

    Ok(Json(EventDetail { event, venue, ticket_types }))
}

pub async fn update_event(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut event = state.event_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    if let Some(val) = payload.title { event.title = val; }
    if let Some(val) = payload.description { event.description = val; }
    if let Some(val) = payload.date { event.date = parse_date(&val)?; }
    if let Some(val) = payload.time {
        validate_time(&val)?;
        event.time = val;
    }
    if let Some(val) = payload.venue_id {
        state.venue_repo.find_by_id(&val).await?
            .ok_or(AppError::NotFound("Venue not found".into()))?;
        event.venue_id = val;
    }
    if let Some(val) = payload.banner_url { event.banner_url = Some(val); }

    let updated = state.event_repo.update(&event).await?;
    info!("Event updated: {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    let attendee_emails: Vec<String> = state.attendee_repo.list_by_event(&event.id).await?
        .into_iter()
        .map(|a| a.email)
        .collect();

    state.event_repo.delete(&event.id).await?;

    for email in &attendee_emails {
        state.mailer.send_event_cancelled_email(email, &event.title).await?;
    }

    info!("Event deleted: {} ({} attendees notified)", event.id, attendee_emails.len());
    Ok(Json(MessageResponse { message: "Event deleted and attendees notified.".to_string() }))
}
