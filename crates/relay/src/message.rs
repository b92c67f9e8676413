//! Rendering of deployment events into chat notifications.
//!
//! Messages use the HTML subset understood by chat-bot APIs (`<b>`, `<code>`).
//! Every value taken from the payload is escaped before interpolation; a
//! project called `<api>` must not turn the whole message into a parse error
//! on the provider side.

use serde::{Deserialize, Serialize};

use crate::{mapper, DeploymentEvent, RelayError, TimeDisplay};

/// Placeholder for payload values that are absent.
pub const UNKNOWN_VALUE: &str = "Unknown";

/// Label of the call-to-action button attached to every notification.
pub const VIEW_DEPLOYMENT: &str = "View Deployment";

// ---------------------------------------------------------------------------
// Notification
// ---------------------------------------------------------------------------

/// Single inline link button shown under a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkButton {
    pub text: String,
    pub url: String,
}

/// A fully rendered chat message, ready to hand to a [`crate::Notifier`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// HTML-formatted message body.
    pub text: String,
    pub button: LinkButton,
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Turns [`DeploymentEvent`]s into [`Notification`]s.
#[derive(Debug, Clone)]
pub struct MessageRenderer {
    dashboard_url: String,
    time_display: TimeDisplay,
}

impl MessageRenderer {
    /// Creates a renderer linking to `dashboard_url` (e.g. `https://railway.app`).
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Configuration`] if the URL is empty or not
    /// `http(s)://`.
    pub fn new(dashboard_url: &str, time_display: TimeDisplay) -> Result<Self, RelayError> {
        let trimmed = dashboard_url.trim().trim_end_matches('/');
        let has_host = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"))
            .is_some_and(|host| !host.is_empty());
        if !has_host {
            return Err(RelayError::Configuration {
                message: format!("dashboard URL '{dashboard_url}' must be an http(s) URL"),
            });
        }

        Ok(Self {
            dashboard_url: trimmed.to_owned(),
            time_display,
        })
    }

    /// Renders the message body and the "View Deployment" link for `event`.
    pub fn render(&self, event: &DeploymentEvent) -> Notification {
        let status = mapper::describe(&event.event_type, event.status.as_deref());
        let time = event
            .timestamp
            .map(|ts| self.time_display.render(ts))
            .unwrap_or_else(|| UNKNOWN_VALUE.to_owned());

        let text = format!(
            "<b>Deployment: {project}</b>\n\
             {emoji} Status: <code>{label}</code>\n\
             🌳 Environment: <code>{environment}</code>\n\
             👨‍💻 Author: <code>{author}</code>\n\
             🕐 Time: <code>{time}</code>",
            project = escape_html(or_unknown(event.project_name.as_ref().map(|p| p.as_str()))),
            emoji = status.emoji,
            label = escape_html(&status.label),
            environment =
                escape_html(or_unknown(event.environment_name.as_ref().map(|e| e.as_str()))),
            author = escape_html(&event.commit_author),
            time = escape_html(&time),
        );

        Notification {
            text,
            button: LinkButton {
                text: VIEW_DEPLOYMENT.to_owned(),
                url: self.dashboard_link(event),
            },
        }
    }

    fn dashboard_link(&self, event: &DeploymentEvent) -> String {
        match &event.project_id {
            Some(id) => format!("{}/project/{}/", self.dashboard_url, encode_path_segment(id.as_str())),
            None => format!("{}/", self.dashboard_url),
        }
    }
}

fn or_unknown(value: Option<&str>) -> &str {
    value.unwrap_or(UNKNOWN_VALUE)
}

/// Escapes the three characters the chat HTML parser treats as markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Percent-encodes everything outside the RFC 3986 unreserved set.
fn encode_path_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}
