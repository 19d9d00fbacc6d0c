use crate::domain::models::{
    attendee::{Attendee, TicketTypeCount}, event::Event, notification::Notification,
    otp::Otp, ticket_type::TicketType, user::User, venue::Venue,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
    async fn list(&self) -> Result<Vec<User>, AppError>;
    async fn count(&self) -> Result<i64, AppError>;
    async fn update_role(&self, email: &str, role: &str) -> Result<User, AppError>;
    async fn update_password(&self, email: &str, password_hash: &str) -> Result<(), AppError>;
    async fn delete_by_email(&self, email: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait VenueRepository: Send + Sync {
    async fn create(&self, venue: &Venue) -> Result<Venue, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Venue>, AppError>;
    async fn find_by_name_and_location(&self, name: &str, location: &str) -> Result<Option<Venue>, AppError>;
    async fn list(&self) -> Result<Vec<Venue>, AppError>;
    async fn list_available_on(&self, date: NaiveDate) -> Result<Vec<Venue>, AppError>;
    async fn update(&self, venue: &Venue) -> Result<Venue, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

/// Optional filters for the public event listing.
#[derive(Debug, Default, Clone)]
pub struct EventFilter {
    pub date: Option<NaiveDate>,
    pub venue_id: Option<String>,
    pub location: Option<String>,
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: &Event) -> Result<Event, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError>;
    async fn find_by_venue_and_date(&self, venue_id: &str, date: NaiveDate) -> Result<Option<Event>, AppError>;
    async fn list(&self, filter: &EventFilter) -> Result<Vec<Event>, AppError>;
    async fn update(&self, event: &Event) -> Result<Event, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait TicketTypeRepository: Send + Sync {
    async fn create(&self, ticket_type: &TicketType) -> Result<TicketType, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<TicketType>, AppError>;
    async fn list(&self) -> Result<Vec<TicketType>, AppError>;
    async fn list_by_event(&self, event_id: &str) -> Result<Vec<TicketType>, AppError>;
    async fn update(&self, ticket_type: &TicketType) -> Result<TicketType, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait AttendeeRepository: Send + Sync {
    /// Registration transaction: decrements the ticket-type quantity (only
    /// while it is still positive) and inserts the attendee row atomically.
    async fn register(&self, attendee: &Attendee) -> Result<Attendee, AppError>;
    /// Deletes the attendee and restores one seat to its ticket type
    /// in the same transaction.
    async fn remove(&self, attendee: &Attendee) -> Result<(), AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Attendee>, AppError>;
    async fn find_by_user_and_event(&self, user_id: &str, event_id: &str) -> Result<Option<Attendee>, AppError>;
    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Attendee>, AppError>;
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Attendee>, AppError>;
    async fn count_by_event(&self, event_id: &str) -> Result<i64, AppError>;
    async fn count_per_ticket_type(&self, event_id: &str) -> Result<Vec<TicketTypeCount>, AppError>;
}

#[async_trait]
pub trait OtpRepository: Send + Sync {
    async fn create(&self, otp: &Otp) -> Result<Otp, AppError>;
    async fn find_latest_by_email(&self, email: &str) -> Result<Option<Otp>, AppError>;
}

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn create(&self, notification: &Notification) -> Result<Notification, AppError>;
    async fn list_by_recipient(&self, recipient_id: &str) -> Result<Vec<Notification>, AppError>;
    async fn find_for_recipient(&self, id: &str, recipient_id: &str) -> Result<Option<Notification>, AppError>;
}

#[async_trait]
pub trait EmailService: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, html_body: &str, attachment_name: Option<&str>, attachment_data: Option<&[u8]>) -> Result<(), AppError>;
}
