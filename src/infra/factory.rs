use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;
use tera::Tera;

use crate::config::Config;
use crate::state::AppState;
use crate::infra::email::http_email_service::HttpEmailService;
use crate::domain::services::{auth_service::AuthService, mailer::Mailer};
use crate::infra::repositories::{
    postgres_user_repo::PostgresUserRepo, postgres_venue_repo::PostgresVenueRepo,
    postgres_event_repo::PostgresEventRepo, postgres_ticket_type_repo::PostgresTicketTypeRepo,
    postgres_attendee_repo::PostgresAttendeeRepo, postgres_otp_repo::PostgresOtpRepo,
    postgres_notification_repo::PostgresNotificationRepo,
    sqlite_user_repo::SqliteUserRepo, sqlite_venue_repo::SqliteVenueRepo,
    sqlite_event_repo::SqliteEventRepo, sqlite_ticket_type_repo::SqliteTicketTypeRepo,
    sqlite_attendee_repo::SqliteAttendeeRepo, sqlite_otp_repo::SqliteOtpRepo,
    sqlite_notification_repo::SqliteNotificationRepo,
};

pub fn load_templates() -> Tera {
    let mut tera = Tera::default();
    tera.add_raw_template("otp.html", include_str!("../templates/otp.html"))
        .expect("Failed to load otp template");
    tera.add_raw_template("ticket.html", include_str!("../templates/ticket.html"))
        .expect("Failed to load ticket template");
    tera.add_raw_template("removal.html", include_str!("../templates/removal.html"))
        .expect("Failed to load removal template");
    tera.add_raw_template("event_cancelled.html", include_str!("../templates/event_cancelled.html"))
        .expect("Failed to load event_cancelled template");
    tera.add_raw_template("notification.html", include_str!("../templates/notification.html"))
        .expect("Failed to load notification template");
    tera
}

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;
    let email_service = Arc::new(HttpEmailService::new(
        config.mail_service_url.clone(),
        config.mail_service_token.clone(),
    ));

    let templates = Arc::new(load_templates());
    let mailer = Arc::new(Mailer::new(email_service, templates));
    let auth_service = Arc::new(AuthService::new(config));

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        AppState {
            config: config.clone(),
            user_repo: Arc::new(PostgresUserRepo::new(pool.clone())),
            venue_repo: Arc::new(PostgresVenueRepo::new(pool.clone())),
            event_repo: Arc::new(PostgresEventRepo::new(pool.clone())),
            ticket_type_repo: Arc::new(PostgresTicketTypeRepo::new(pool.clone())),
            attendee_repo: Arc::new(PostgresAttendeeRepo::new(pool.clone())),
            otp_repo: Arc::new(PostgresOtpRepo::new(pool.clone())),
            notification_repo: Arc::new(PostgresNotificationRepo::new(pool.clone())),
            auth_service,
            mailer,
        }
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        AppState {
            config: config.clone(),
            user_repo: Arc::new(SqliteUserRepo::new(pool.clone())),
            venue_repo: Arc::new(SqliteVenueRepo::new(pool.clone())),
            event_repo: Arc::new(SqliteEventRepo::new(pool.clone())),
            ticket_type_repo: Arc::new(SqliteTicketTypeRepo::new(pool.clone())),
            attendee_repo: Arc::new(SqliteAttendeeRepo::new(pool.clone())),
            otp_repo: Arc::new(SqliteOtpRepo::new(pool.clone())),
            notification_repo: Arc::new(SqliteNotificationRepo::new(pool.clone())),
            auth_service,
            mailer,
        }
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
