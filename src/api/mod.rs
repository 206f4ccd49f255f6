//! HTTP server: admin JSON API, public site, websocket feed.

mod cache;
pub mod error;
pub mod notifier;
pub mod routes;
mod session;
mod state;
pub mod v1;
mod websocket;

#[cfg(test)]
mod cache_test;
#[cfg(test)]
mod error_test;

use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use cache::{PageCache, cache_key};
pub use error::{ApiError, ErrorResponse};
pub use notifier::{ChangeNotifier, Entity, UpdateMessage};
pub use session::{CurrentUser, require_admin, session_token_hash};
pub use state::AppState;

use crate::auth::SessionConfig;
use crate::db::{Database, DbError, SqliteDatabase};

/// Failures while starting or running the server.
#[derive(Error, Diagnostic, Debug)]
pub enum ServerError {
    #[error("Database error: {0}")]
    #[diagnostic(code(atelier::server::database))]
    Database(#[from] DbError),

    #[error("I/O error: {0}")]
    #[diagnostic(
        code(atelier::server::io),
        help("Check that the address is free and the paths are writable")
    )]
    Io(#[from] std::io::Error),
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Host address to bind to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// SQLite database file
    pub db_path: PathBuf,
    /// Static files (css, uploads) served for unmatched paths
    pub public_dir: Option<PathBuf>,
    /// Marks session cookies `Secure`
    pub production: bool,
    /// Lifetime of an admin login, in days
    pub session_days: i64,
    /// Lifetime of a "remember me" login, in days
    pub remember_days: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
            db_path: PathBuf::from("atelier.db"),
            public_dir: None,
            production: false,
            session_days: SessionConfig::default().ttl_days,
            remember_days: SessionConfig::default().remember_ttl_days,
        }
    }
}

impl Config {
    pub fn with_db_path(mut self, path: PathBuf) -> Self {
        self.db_path = path;
        self
    }

    pub fn with_public_dir(mut self, dir: PathBuf) -> Self {
        self.public_dir = Some(dir);
        self
    }

    pub fn with_production(mut self, production: bool) -> Self {
        self.production = production;
        self
    }

    pub fn with_session_days(mut self, days: i64, remember_days: i64) -> Self {
        self.session_days = days;
        self.remember_days = remember_days;
        self
    }

    /// Session settings derived from the deployment mode.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            secure: self.production,
            ttl_days: self.session_days,
            remember_ttl_days: self.remember_days,
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Initialize tracing subscriber with env filter
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "atelier=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Open the database, apply migrations and serve until the process stops.
pub async fn run(config: Config) -> Result<(), ServerError> {
    init_tracing();

    if let Some(parent) = config.db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    info!(path = %config.db_path.display(), "Opening database");
    let db = SqliteDatabase::open(&config.db_path).await?;
    db.migrate().await?;
    info!("Database migrations complete");

    let state = AppState::new(db, ChangeNotifier::new(), config.session_config());
    let app = routes::create_router(state, config.public_dir.clone())
        .layer(TraceLayer::new_for_http());

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
