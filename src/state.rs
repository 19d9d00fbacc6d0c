use std::sync::Arc;
use crate::domain::ports::{
    AttendeeRepository, EventRepository, NotificationRepository, OtpRepository,
    TicketTypeRepository, UserRepository, VenueRepository,
};
use crate::domain::services::{auth_service::AuthService, mailer::Mailer};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub venue_repo: Arc<dyn VenueRepository>,
    pub event_repo: Arc<dyn EventRepository>,
    pub ticket_type_repo: Arc<dyn TicketTypeRepository>,
    pub attendee_repo: Arc<dyn AttendeeRepository>,
    pub otp_repo: Arc<dyn OtpRepository>,
    pub notification_repo: Arc<dyn NotificationRepository>,
    pub auth_service: Arc<AuthService>,
    pub mailer: Arc<Mailer>,
}
