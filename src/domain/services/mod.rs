pub mod auth_service;
pub mod capacity;
pub mod csv_export;
pub mod mailer;
pub mod ticket_pdf;
