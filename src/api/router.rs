use axum::{
    body::Body,
    extract::Request,
    routing::{delete, get, patch, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{attendee, auth, event, health, notification, ticket_type, user, venue};
use tower_http::{
    classify::ServerErrorsFailureClass,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info, info_span, Span};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Auth & OTP flow
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/send-otp", post(auth::send_otp))
        .route("/api/v1/auth/verify-otp", post(auth::verify_otp))
        .route("/api/v1/auth/complete-registration", post(auth::complete_registration))
        .route("/api/v1/auth/forgot-password", post(auth::forgot_password))
        .route("/api/v1/auth/reset-password", post(auth::reset_password))

        // Venues
        .route("/api/v1/venues", get(venue::list_venues).post(venue::create_venue))
        .route("/api/v1/venues/available", get(venue::available_venues))
        .route("/api/v1/venues/{id}", patch(venue::update_venue).delete(venue::delete_venue))

        // Events
        .route("/api/v1/events", get(event::list_events).post(event::create_event))
        .route("/api/v1/events/{id}", get(event::get_event).patch(event::update_event).delete(event::delete_event))

        // Ticket types
        .route("/api/v1/ticket-types", get(ticket_type::list_ticket_types).post(ticket_type::create_ticket_type))
        .route("/api/v1/ticket-types/event/{event_id}", get(ticket_type::list_by_event))
        .route("/api/v1/ticket-types/{id}", patch(ticket_type::update_ticket_type).delete(ticket_type::delete_ticket_type))

        // Attendees ({id} is an event id for register/export, an attendee id otherwise)
        .route("/api/v1/attendees/{id}/register/{ticket_type_id}", post(attendee::register))
        .route("/api/v1/attendees/event/{event_id}", get(attendee::list_by_event))
        .route("/api/v1/attendees/user/{user_id}", get(attendee::list_by_user))
        .route("/api/v1/attendees/{id}/export", get(attendee::export_csv))
        .route("/api/v1/attendees/{id}/ticket", get(attendee::download_ticket))
        .route("/api/v1/attendees/{id}", delete(attendee::remove))

        // Notifications (POST targets an event id, GET a notification id)
        .route("/api/v1/notifications", get(notification::list_own))
        .route("/api/v1/notifications/{id}", get(notification::get_own).post(notification::send_to_attendees))

        // Users
        .route("/api/v1/users", get(user::list_users).delete(user::delete_user))
        .route("/api/v1/users/role", patch(user::update_role))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
