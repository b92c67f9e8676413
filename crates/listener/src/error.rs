//! Listener errors and their HTTP mapping.

use actix_web::body::BoxBody;
use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, HttpResponseBuilder, ResponseError};
use thiserror::Error;

use relay::RelayError;

#[derive(Debug, Error)]
pub enum ListenerError {
    /// Handling a delivery failed. Surfaced to the webhook caller as 500 so
    /// the platform can redeliver.
    #[error(transparent)]
    Relay(#[from] RelayError),

    #[error("Unable to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP server terminated: {0}")]
    Server(#[source] std::io::Error),
}

impl ResponseError for ListenerError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    /// The body never carries error detail; that goes to the log only.
    fn error_response(&self) -> HttpResponse<BoxBody> {
        HttpResponseBuilder::new(self.status_code())
            .insert_header(ContentType::plaintext())
            .body("Internal Server Error")
    }
}
