//! Port traits implemented by infrastructure crates.
//!
//! The relay domain defines *what* it needs from the outside world; the
//! `telegram` crate defines *how* to supply it.

use async_trait::async_trait;

use crate::{Notification, NotifyError};

/// Delivers a rendered [`Notification`] to the configured chat destination.
///
/// Implementations make exactly one outbound call per invocation. They must
/// not retry; a failure is reported to the webhook caller, which owns retry.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends `notification`.
    ///
    /// # Errors
    ///
    /// [`NotifyError::Transport`] when the provider is unreachable,
    /// [`NotifyError::Rejected`] when it refuses the message.
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError>;
}
