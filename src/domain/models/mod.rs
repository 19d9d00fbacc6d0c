pub mod attendee;
pub mod auth;
pub mod event;
pub mod notification;
pub mod otp;
pub mod ticket_type;
pub mod user;
pub mod venue;
