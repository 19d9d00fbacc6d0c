use serde::Serialize;
use crate::domain::models::{attendee::Attendee, event::Event, ticket_type::TicketType, venue::Venue};
use crate::domain::services::capacity::TicketAvailability;

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Public event listing entry: the event with its venue and read-time
/// availability; sold-out ticket types are already filtered out.
#[derive(Serialize)]
pub struct EventWithStats {
    #[serde(flatten)]
    pub event: Event,
    pub venue: Option<Venue>,
    pub registered_count: i64,
    pub remaining_tickets: i64,
    pub ticket_types: Vec<TicketAvailability>,
}

/// Single-event view for the registration page: all ticket types included.
#[derive(Serialize)]
pub struct EventDetail {
    #[serde(flatten)]
    pub event: Event,
    pub venue: Option<Venue>,
    pub ticket_types: Vec<TicketType>,
}

#[derive(Serialize)]
pub struct AttendeeDetail {
    #[serde(flatten)]
    pub attendee: Attendee,
    pub event: Option<Event>,
    pub venue: Option<Venue>,
    pub ticket_type: Option<TicketType>,
}
