use axum::{extract::{Path, State}, http::header, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::{AdminUser, AuthUser};
use crate::api::dtos::responses::{AttendeeDetail, MessageResponse};
use crate::domain::models::attendee::Attendee;
use crate::domain::services::csv_export::{attendee_csv, AttendeeCsvRow};
use crate::domain::services::ticket_pdf::{generate_ticket_pdf, TicketData};
use crate::error::AppError;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

pub async fn register(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path((event_id, ticket_type_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    info!("register: user {} for event {}", user.id, event_id);

    let user = state.user_repo.find_by_id(&user.id).await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event or Ticket not found".into()))?;
    let ticket = state.ticket_type_repo.find_by_id(&ticket_type_id).await?
        .ok_or(AppError::NotFound("Event or Ticket not found".into()))?;

    if ticket.event_id != event.id {
        return Err(AppError::Validation("Ticket type does not belong to this event".into()));
    }

    let venue = state.venue_repo.find_by_id(&event.venue_id).await?
        .ok_or(AppError::Internal)?;

    if state.attendee_repo.find_by_user_and_event(&user.id, &event.id).await?.is_some() {
        return Err(AppError::Forbidden("You have already registered for this event.".into()));
    }

    if ticket.quantity <= 0 {
        warn!("register rejected: ticket type {} sold out", ticket.id);
        return Err(AppError::Forbidden("No seats available for this ticket type".into()));
    }

    let attendee = Attendee::new(
        user.id.clone(),
        event.id.clone(),
        ticket.id.clone(),
        user.name.clone(),
        user.email.clone(),
    );

    let created = state.attendee_repo.register(&attendee).await?;
    info!("register: attendee {} persisted", created.id);

    let pdf = generate_ticket_pdf(&TicketData {
        attendee_name: &user.name,
        attendee_email: &user.email,
        event_title: &event.title,
        venue_name: &venue.name,
        venue_location: &venue.location,
        event_date: &event.date.to_string(),
        event_time: &event.time,
        ticket_type: &ticket.name,
    })?;

    state.mailer.send_ticket_email(&user.email, &event.title, &pdf).await?;

    info!("Registration confirmed: {} for event {}", created.id, event.id);
    Ok(Json(MessageResponse { message: "Registration successful, ticket emailed.".to_string() }))
}

pub async fn list_by_event(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let attendees = state.attendee_repo.list_by_event(&event_id).await?;
    Ok(Json(attendees))
}

pub async fn remove(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let attendee = state.attendee_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Attendee not found".into()))?;

    state.attendee_repo.remove(&attendee).await?;
    state.mailer.send_removal_email(&attendee.email).await?;

    info!("Attendee removed: {} (seat returned)", attendee.id);
    Ok(Json(attendee))
}

pub async fn export_csv(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    let attendees = state.attendee_repo.list_by_event(&event.id).await?;
    let type_names: HashMap<String, String> = state.ticket_type_repo.list_by_event(&event.id).await?
        .into_iter()
        .map(|t| (t.id, t.name))
        .collect();

    let rows: Vec<AttendeeCsvRow> = attendees.into_iter()
        .map(|a| AttendeeCsvRow {
            ticket_type: type_names.get(&a.ticket_type_id).cloned().unwrap_or_default(),
            name: a.name,
            email: a.email,
            registered_at: a.created_at.to_rfc3339(),
        })
        .collect();

    let bytes = attendee_csv(&rows)?;

    info!("CSV export generated for event {} ({} rows)", event.id, rows.len());

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename=\"event-{}-attendees.csv\"", event.id)),
        ],
        bytes,
    ))
}

pub async fn download_ticket(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let attendee = state.attendee_repo.find_by_id(&id).await?
        .filter(|a| a.user_id == user.id)
        .ok_or(AppError::NotFound("Ticket not found or access denied".into()))?;

    let event = state.event_repo.find_by_id(&attendee.event_id).await?
        .ok_or(AppError::Internal)?;
    let venue = state.venue_repo.find_by_id(&event.venue_id).await?
        .ok_or(AppError::Internal)?;
    let ticket = state.ticket_type_repo.find_by_id(&attendee.ticket_type_id).await?
        .ok_or(AppError::Internal)?;

    let pdf = generate_ticket_pdf(&TicketData {
        attendee_name: &attendee.name,
        attendee_email: &attendee.email,
        event_title: &event.title,
        venue_name: &venue.name,
        venue_location: &venue.location,
        event_date: &event.date.to_string(),
        event_time: &event.time,
        ticket_type: &ticket.name,
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename=\"ticket-{}.pdf\"", attendee.id)),
        ],
        pdf,
    ))
}

pub async fn list_by_user(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if user.id != user_id {
        return Err(AppError::Forbidden("You are not allowed to view other users' data".into()));
    }

    let attendees = state.attendee_repo.list_by_user(&user_id).await?;

    let mut results = Vec::with_capacity(attendees.len());
    for attendee in attendees {
        let event = state.event_repo.find_by_id(&attendee.event_id).await?;
        let venue = match &event {
            Some(e) => state.venue_repo.find_by_id(&e.venue_id).await?,
            None => None,
        };
        let ticket_type = state.ticket_type_repo.find_by_id(&attendee.ticket_type_id).await?;

        results.push(AttendeeDetail { attendee, event, venue, ticket_type });
    }

    Ok(Json(results))
}
