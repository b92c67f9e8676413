//! Deploy-relay inbound webhook receiver.
//!
//! Binds an actix-web HTTP server and exposes the relay on a single route:
//!
//! | Method | Path | Response |
//! |--------|------|----------|
//! | `POST` | `/webhook` | 200 when the event was delivered or ignored; 500 when the send failed |
//! | any other | any | 405 with a static text body |
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** HTTP transport and status-code mapping live here. The
//! [`relay`] crate sees only raw body bytes through [`relay::Relay::handle`].
//!
//! Each request is handled independently; [`relay::Relay`] is shared read-only
//! across actix workers. Redelivery after a 500 is the caller's concern.

pub mod error;
pub mod routes;

use actix_web::{web, App, HttpServer};
use tracing::info;

use relay::Relay;

pub use error::ListenerError;
pub use routes::{configure, METHOD_NOT_ALLOWED_BODY, WEBHOOK_PATH};

/// Port used when none is configured.
pub const DEFAULT_PORT: u16 = 5000;

/// Where the HTTP server listens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerConfig {
    pub bind_address: String,
    pub port: u16,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_owned(),
            port: DEFAULT_PORT,
        }
    }
}

/// Runs the HTTP server until it receives SIGINT/SIGTERM.
///
/// # Errors
///
/// [`ListenerError::Bind`] if the address is unavailable,
/// [`ListenerError::Server`] if the server stops with an I/O error.
pub async fn serve(config: ListenerConfig, relay: Relay) -> Result<(), ListenerError> {
    let relay = web::Data::new(relay);
    let address = format!("{}:{}", config.bind_address, config.port);

    let server = HttpServer::new(move || App::new().app_data(relay.clone()).configure(configure))
        .bind((config.bind_address.as_str(), config.port))
        .map_err(|source| ListenerError::Bind {
            address: address.clone(),
            source,
        })?;

    info!(%address, path = WEBHOOK_PATH, "Server listening");
    server.run().await.map_err(ListenerError::Server)
}
