use std::sync::Arc;
use crate::domain::ports::EmailService;
use crate::error::AppError;
use tera::{Context, Tera};
use tracing::info;

/// Transactional mail catalogue. Bodies are rendered from the compiled-in
/// tera templates; delivery goes through the EmailService port.
pub struct Mailer {
    email_service: Arc<dyn EmailService>,
    templates: Arc<Tera>,
}

impl Mailer {
    pub fn new(email_service: Arc<dyn EmailService>, templates: Arc<Tera>) -> Self {
        Self { email_service, templates }
    }

    fn render(&self, template: &str, context: &Context) -> Result<String, AppError> {
        self.templates.render(template, context)
            .map_err(|e| AppError::InternalWithMsg(format!("Template render error ({}): {:?}", template, e)))
    }

    pub async fn send_otp_email(&self, to: &str, code: &str) -> Result<(), AppError> {
        let mut context = Context::new();
        context.insert("code", code);
        let html = self.render("otp.html", &context)?;

        self.email_service.send(to, "OTP Verification - Event App", &html, None, None).await?;
        info!("OTP email sent to {}", to);
        Ok(())
    }

    pub async fn send_ticket_email(&self, to: &str, event_title: &str, pdf: &[u8]) -> Result<(), AppError> {
        let mut context = Context::new();
        context.insert("event_title", event_title);
        let html = self.render("ticket.html", &context)?;

        self.email_service.send(to, "Your Event Ticket", &html, Some("ticket.pdf"), Some(pdf)).await?;
        info!("Ticket email sent to {}", to);
        Ok(())
    }

    pub async fn send_removal_email(&self, to: &str) -> Result<(), AppError> {
        let html = self.render("removal.html", &Context::new())?;
        self.email_service.send(to, "Registration Cancelled", &html, None, None).await
    }

    pub async fn send_event_cancelled_email(&self, to: &str, event_title: &str) -> Result<(), AppError> {
        let mut context = Context::new();
        context.insert("event_title", event_title);
        let html = self.render("event_cancelled.html", &context)?;

        let subject = format!("Event Canceled: {}", event_title);
        self.email_service.send(to, &subject, &html, None, None).await
    }

    pub async fn send_notification_email(&self, to: &str, message: &str) -> Result<(), AppError> {
        let mut context = Context::new();
        context.insert("message", message);
        let html = self.render("notification.html", &context)?;

        self.email_service.send(to, "Event Notification", &html, None, None).await
    }
}
