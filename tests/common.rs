use ticketing_backend::{
    api::router::create_router,
    state::AppState,
    config::Config,
    infra::factory::load_templates,
    infra::repositories::{
        sqlite_attendee_repo::SqliteAttendeeRepo,
        sqlite_event_repo::SqliteEventRepo,
        sqlite_notification_repo::SqliteNotificationRepo,
        sqlite_otp_repo::SqliteOtpRepo,
        sqlite_ticket_type_repo::SqliteTicketTypeRepo,
        sqlite_user_repo::SqliteUserRepo,
        sqlite_venue_repo::SqliteVenueRepo,
    },
    domain::services::{auth_service::AuthService, mailer::Mailer},
    domain::ports::EmailService,
    error::AppError,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::sync::{Arc, Mutex};
use uuid::Uuid;
use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
    Router,
};
use std::str::FromStr;
use async_trait::async_trait;
use tower::ServiceExt;
use serde_json::Value;

#[derive(Clone, Debug)]
pub struct SentEmail {
    pub recipient: String,
    pub subject: String,
    pub html_body: String,
    pub attachment_name: Option<String>,
    pub attachment_data: Option<Vec<u8>>,
}

/// Records every send instead of talking to the mail relay, so tests can
/// read OTP codes and ticket attachments back out.
#[derive(Default)]
pub struct RecordingEmailService {
    pub sent: Mutex<Vec<SentEmail>>,
}

#[async_trait]
impl EmailService for RecordingEmailService {
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        html_body: &str,
        attachment_name: Option<&str>,
        attachment_data: Option<&[u8]>
    ) -> Result<(), AppError> {
        self.sent.lock().unwrap().push(SentEmail {
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            html_body: html_body.to_string(),
            attachment_name: attachment_name.map(|n| n.to_string()),
            attachment_data: attachment_data.map(|d| d.to_vec()),
        });
        Ok(())
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
    pub outbox: Arc<RecordingEmailService>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            mail_service_url: "http://localhost".to_string(),
            mail_service_token: "token".to_string(),
            jwt_secret: "test-secret-please-rotate".to_string(),
            auth_issuer: "test-issuer".to_string(),
        };

        let outbox = Arc::new(RecordingEmailService::default());
        let email_service: Arc<dyn EmailService> = outbox.clone();
        let templates = Arc::new(load_templates());
        let mailer = Arc::new(Mailer::new(email_service, templates));
        let auth_service = Arc::new(AuthService::new(&config));

        let state = Arc::new(AppState {
            config,
            user_repo: Arc::new(SqliteUserRepo::new(pool.clone())),
            venue_repo: Arc::new(SqliteVenueRepo::new(pool.clone())),
            event_repo: Arc::new(SqliteEventRepo::new(pool.clone())),
            ticket_type_repo: Arc::new(SqliteTicketTypeRepo::new(pool.clone())),
            attendee_repo: Arc::new(SqliteAttendeeRepo::new(pool.clone())),
            otp_repo: Arc::new(SqliteOtpRepo::new(pool.clone())),
            notification_repo: Arc::new(SqliteNotificationRepo::new(pool.clone())),
            auth_service,
            mailer,
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
            outbox,
        }
    }

    pub async fn request(&self, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        self.router.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
    }

    pub fn emails(&self) -> Vec<SentEmail> {
        self.outbox.sent.lock().unwrap().clone()
    }

    pub fn last_email(&self) -> SentEmail {
        self.emails().last().expect("no email was sent").clone()
    }

    /// Runs the full OTP flow: send-otp, read the code from the outbox,
    /// complete the registration.
    pub async fn register_user(&self, name: &str, email: &str, password: &str) {
        let res = self.request("POST", "/api/v1/auth/send-otp", None,
            Some(serde_json::json!({"email": email}))).await;
        assert!(res.status().is_success(), "send-otp failed: {}", res.status());

        let otp = extract_otp(&self.last_email().html_body);

        let res = self.request("POST", "/api/v1/auth/complete-registration", None,
            Some(serde_json::json!({
                "name": name,
                "email": email,
                "password": password,
                "otp": otp
            }))).await;
        assert!(res.status().is_success(), "complete-registration failed: {}", res.status());
    }

    pub async fn login(&self, email: &str, password: &str) -> String {
        let res = self.request("POST", "/api/v1/auth/login", None,
            Some(serde_json::json!({"email": email, "password": password}))).await;
        assert!(res.status().is_success(), "login failed in test helper: {}", res.status());

        let body = parse_body(res).await;
        body["access_token"].as_str().expect("no access_token in body").to_string()
    }

    /// Registers the first user (who becomes ADMIN) and returns their token.
    pub async fn setup_admin(&self) -> String {
        self.register_user("Admin", "admin@example.com", "admin-pass-1").await;
        self.login("admin@example.com", "admin-pass-1").await
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}

#[allow(dead_code)]
pub async fn parse_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[allow(dead_code)]
pub async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
}

/// Pulls the 6-digit code out of a rendered OTP email.
#[allow(dead_code)]
pub fn extract_otp(html: &str) -> String {
    let mut run = String::new();
    for ch in html.chars() {
        if ch.is_ascii_digit() {
            run.push(ch);
            if run.len() == 6 {
                return run;
            }
        } else {
            run.clear();
        }
    }
    panic!("no OTP code found in email body");
}
