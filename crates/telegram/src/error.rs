//! Telegram adapter errors.

use thiserror::Error;

use relay::NotifyError;

/// Errors from talking to the Bot API.
#[derive(Debug, Error)]
pub enum TelegramError {
    /// The adapter was constructed with unusable settings.
    #[error("Invalid Telegram configuration: {0}")]
    InvalidConfig(String),

    /// The request never produced a Bot API answer (connect, TLS, timeout).
    ///
    /// Always built from an error stripped of its URL: the URL embeds the bot token.
    #[error("Telegram request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The Bot API answered with `ok: false` or a non-2xx status.
    #[error("Telegram API error (HTTP {status}, code {error_code:?}): {description}")]
    Api {
        status: u16,
        error_code: Option<i64>,
        description: String,
    },
}

impl From<TelegramError> for NotifyError {
    fn from(err: TelegramError) -> Self {
        match err {
            TelegramError::Api {
                status,
                description,
                ..
            } => NotifyError::Rejected {
                status,
                description,
            },
            other => NotifyError::Transport {
                message: other.to_string(),
            },
        }
    }
}
