//! Deploy-relay entry point.
//!
//! This binary is the composition root. Responsibilities:
//!
//! 1. **Parse configuration** — flags and environment variables via
//!    [`config::CliConfig`]; missing Telegram credentials abort startup.
//! 2. **Wire observability** — install the `tracing` subscriber (text or JSON)
//!    and, optionally, the OTLP span exporter.
//! 3. **Construct infrastructure** — build the [`telegram::TelegramNotifier`]
//!    and inject it into a [`relay::Relay`].
//! 4. **Serve** — run the [`listener`] HTTP server until shutdown.

mod config;
mod observability;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use config::CliConfig;
use relay::Relay;
use telegram::TelegramNotifier;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();
    let settings = cli.validate()?;

    let _guard = observability::init(cli.log_format, cli.otlp_endpoint.as_deref())?;

    let notifier = TelegramNotifier::new(settings.telegram.clone())
        .context("failed to initialise the Telegram client")?;
    let relay = Relay::new(Arc::new(notifier), settings.renderer);

    info!(
        chat_id = %settings.telegram.chat_id,
        port = settings.listener.port,
        "Starting deploy-relay"
    );

    listener::serve(settings.listener, relay)
        .await
        .context("webhook listener failed")
}
