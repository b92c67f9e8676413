//! Core domain for the deployment webhook relay.
//!
//! This crate turns a CI/CD platform's deployment webhook into a chat
//! notification: it parses the payload, maps the event type to a status line,
//! renders the HTML message and its "View Deployment" link, and hands the
//! result to a [`Notifier`]. Infrastructure crates implement [`Notifier`] and
//! expose [`Relay`] over HTTP; they never add domain rules.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is needed; infrastructure crates define *how* to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`ProjectId`, `ChatId`, `DeliveryId`, etc.) |
//! | [`types`] | Value types (`EventType`, `Timestamp`, `TimeDisplay`) |
//! | [`event`] | Webhook payload parsing into [`DeploymentEvent`] |
//! | [`mapper`] | Event type → emoji/status lookup table |
//! | [`message`] | HTML message and link rendering |
//! | [`ports`] | The [`Notifier`] trait |
//! | [`service`] | [`Relay`], which ties the above together per request |
//! | [`errors`] | [`RelayError`] and [`NotifyError`] |

pub mod errors;
pub mod event;
pub mod identifiers;
pub mod mapper;
pub mod message;
pub mod ports;
pub mod service;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use errors::{NotifyError, RelayError};
pub use event::{parse_event, DeploymentEvent, InboundEvent, UNKNOWN_AUTHOR};
pub use identifiers::{ChatId, DeliveryId, EnvironmentName, ProjectId, ProjectName};
pub use mapper::{describe, StatusDisplay};
pub use message::{escape_html, LinkButton, MessageRenderer, Notification};
pub use ports::Notifier;
pub use service::{Disposition, IgnoreReason, Relay};
pub use types::{EventType, TimeDisplay, Timestamp, DEPLOYMENT_NAMESPACE};
