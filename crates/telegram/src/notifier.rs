//! [`relay::Notifier`] implementation over the Bot API `sendMessage` method.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, instrument};

use relay::{ChatId, Notification, Notifier, NotifyError};

use crate::api::{ApiResponse, SendMessageRequest};
use crate::TelegramError;

/// Public Bot API host.
pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Default client-side timeout for one `sendMessage` call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Bot credential issued by @BotFather.
///
/// `Debug` is redacted so the token cannot leak through `{:?}` logging.
#[derive(Clone)]
pub struct BotToken(String);

impl BotToken {
    /// Returns `None` if `value` is empty or whitespace only.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let v = value.into().trim().to_owned();
        if v.is_empty() { None } else { Some(Self(v)) }
    }

    fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for BotToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BotToken(***)")
    }
}

/// Settings for [`TelegramNotifier`].
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Bot API base URL; overridable for self-hosted Bot API servers and tests.
    pub api_base: String,
    pub bot_token: BotToken,
    pub chat_id: ChatId,
    pub timeout: Duration,
}

impl TelegramConfig {
    /// Configuration against the public Bot API with the default timeout.
    pub fn new(bot_token: BotToken, chat_id: ChatId) -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_owned(),
            bot_token,
            chat_id,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

// ---------------------------------------------------------------------------
// Notifier
// ---------------------------------------------------------------------------

/// Sends deployment notifications to one Telegram chat.
pub struct TelegramNotifier {
    client: reqwest::Client,
    /// `{api_base}/bot{token}/sendMessage`. Never logged.
    endpoint: String,
    chat_id: ChatId,
}

impl TelegramNotifier {
    /// Builds the HTTP client and the `sendMessage` endpoint.
    ///
    /// # Errors
    ///
    /// [`TelegramError::InvalidConfig`] if `api_base` is not an http(s) URL;
    /// [`TelegramError::Transport`] if the TLS backend cannot be initialised.
    pub fn new(config: TelegramConfig) -> Result<Self, TelegramError> {
        let api_base = config.api_base.trim().trim_end_matches('/');
        if !(api_base.starts_with("https://") || api_base.starts_with("http://")) {
            return Err(TelegramError::InvalidConfig(format!(
                "API base URL '{api_base}' must be an http(s) URL"
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TelegramError::Transport(e.without_url()))?;

        Ok(Self {
            client,
            endpoint: format!("{api_base}/bot{}/sendMessage", config.bot_token.expose()),
            chat_id: config.chat_id,
        })
    }

    /// Performs one `sendMessage` call. No retry.
    #[instrument(skip_all, fields(chat_id = %self.chat_id))]
    pub async fn send_message(&self, notification: &Notification) -> Result<(), TelegramError> {
        let request = SendMessageRequest::new(self.chat_id.as_str(), notification);

        debug!("Calling sendMessage");
        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| TelegramError::Transport(e.without_url()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| TelegramError::Transport(e.without_url()))?;

        match serde_json::from_slice::<ApiResponse>(&body) {
            Ok(reply) if reply.ok && status.is_success() => {
                debug!(status = status.as_u16(), "sendMessage accepted");
                Ok(())
            }
            Ok(reply) => Err(TelegramError::Api {
                status: status.as_u16(),
                error_code: reply.error_code,
                description: reply
                    .description
                    .unwrap_or_else(|| "no description".to_owned()),
            }),
            Err(_) if status.is_success() => {
                debug!(status = status.as_u16(), "sendMessage accepted (non-JSON reply)");
                Ok(())
            }
            Err(_) => Err(TelegramError::Api {
                status: status.as_u16(),
                error_code: None,
                description: String::from_utf8_lossy(&body).into_owned(),
            }),
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        self.send_message(notification).await.map_err(NotifyError::from)
    }
}
