//! Command-line and environment configuration.
//!
//! Every option can be given as a flag or through its environment variable;
//! flags win. The two Telegram values are required and the process exits with
//! a usage error before binding anything if either is missing.

use std::time::Duration;

use anyhow::{anyhow, Context};
use clap::{Parser, ValueEnum};

use listener::{ListenerConfig, DEFAULT_PORT};
use relay::{ChatId, MessageRenderer, TimeDisplay};
use telegram::{BotToken, TelegramConfig, DEFAULT_API_BASE};

/// Output format of the log stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable, one line per event.
    Text,
    /// One JSON object per event, including the current span.
    Json,
}

/// Relays CI/CD deployment webhooks to a Telegram chat.
#[derive(Debug, Parser)]
#[command(name = "deploy-relay", version, about)]
pub struct CliConfig {
    /// Telegram bot token issued by @BotFather.
    #[arg(long, env = "TELEGRAM_BOT_TOKEN", hide_env_values = true)]
    pub bot_token: String,

    /// Destination chat id (numeric) or @channel username.
    #[arg(long, env = "TELEGRAM_CHAT_ID")]
    pub chat_id: String,

    /// Port the webhook receiver listens on.
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Address the webhook receiver binds to.
    #[arg(long, env = "BIND_ADDRESS", default_value = "0.0.0.0")]
    pub bind_address: String,

    /// Bot API base URL.
    #[arg(long, env = "TELEGRAM_API_URL", default_value = DEFAULT_API_BASE)]
    pub telegram_api_url: String,

    /// Timeout for one sendMessage call, in seconds.
    #[arg(long, env = "TELEGRAM_TIMEOUT_SECS", default_value_t = 30)]
    pub telegram_timeout_secs: u64,

    /// Base URL of the deployment dashboard used for the "View Deployment" link.
    #[arg(long, env = "DASHBOARD_URL", default_value = "https://railway.app")]
    pub dashboard_url: String,

    /// UTC offset for displayed times (`+05:30`, `-08:00`, `UTC`). Defaults to
    /// the host's local time zone.
    #[arg(long, env = "DISPLAY_UTC_OFFSET")]
    pub display_utc_offset: Option<TimeDisplay>,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// OTLP/gRPC collector endpoint; spans are exported only when set.
    #[arg(long, env = "OTEL_EXPORTER_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,
}

/// Validated settings for every component.
#[derive(Debug)]
pub struct Settings {
    pub listener: ListenerConfig,
    pub telegram: TelegramConfig,
    pub renderer: MessageRenderer,
}

impl CliConfig {
    /// Converts raw option strings into component configuration.
    pub fn validate(&self) -> anyhow::Result<Settings> {
        let bot_token = BotToken::new(self.bot_token.as_str())
            .ok_or_else(|| anyhow!("TELEGRAM_BOT_TOKEN must not be empty"))?;
        let chat_id = ChatId::new(self.chat_id.trim())
            .ok_or_else(|| anyhow!("TELEGRAM_CHAT_ID must not be empty"))?;
        if self.telegram_timeout_secs == 0 {
            return Err(anyhow!("TELEGRAM_TIMEOUT_SECS must be at least 1"));
        }

        let renderer = MessageRenderer::new(
            &self.dashboard_url,
            self.display_utc_offset.unwrap_or_default(),
        )
        .context("invalid DASHBOARD_URL")?;

        Ok(Settings {
            listener: ListenerConfig {
                bind_address: self.bind_address.clone(),
                port: self.port,
            },
            telegram: TelegramConfig {
                api_base: self.telegram_api_url.clone(),
                bot_token,
                chat_id,
                timeout: Duration::from_secs(self.telegram_timeout_secs),
            },
            renderer,
        })
    }
}
