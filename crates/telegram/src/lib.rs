//! Deploy-relay Telegram adapter.
//!
//! Implements the [`relay::Notifier`] trait on top of the Telegram Bot API
//! `sendMessage` method: HTML parse mode, link previews disabled, and a single
//! inline "View Deployment" button.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** HTTP transport, request formatting, and Bot API
//! response parsing live here. The [`relay`] crate sees only
//! [`relay::Notifier`] and [`relay::NotifyError`].
//!
//! ## Failure handling
//!
//! One call per notification. There is no retry, back-off, or circuit
//! breaking; an `ok: false` reply is returned as [`TelegramError::Api`] with
//! the provider's `description` so the caller can log it. The bot token is
//! part of the request URL, so transport errors are stripped of their URL
//! before they leave this crate.

mod api;
pub mod error;
pub mod notifier;

pub use error::TelegramError;
pub use notifier::{BotToken, TelegramConfig, TelegramNotifier, DEFAULT_API_BASE, DEFAULT_TIMEOUT};
