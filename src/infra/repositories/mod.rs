pub mod sqlite_user_repo;
pub mod sqlite_venue_repo;
pub mod sqlite_event_repo;
pub mod sqlite_ticket_type_repo;
pub mod sqlite_attendee_repo;
pub mod sqlite_otp_repo;
pub mod sqlite_notification_repo;

pub mod postgres_user_repo;
pub mod postgres_venue_repo;
pub mod postgres_event_repo;
pub mod postgres_ticket_type_repo;
pub mod postgres_attendee_repo;
pub mod postgres_otp_repo;
pub mod postgres_notification_repo;
