//! Newtype domain identifiers.
//!
//! Every value that names something in a deployment notification is a distinct
//! newtype wrapping a `String`. This prevents accidentally passing — for
//! example — a [`ProjectName`] where a [`ProjectId`] is expected when building
//! the dashboard link, even though both are plain strings on the wire.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty
            /// or whitespace only.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.trim().is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers — platform-assigned
// ---------------------------------------------------------------------------

string_id! {
    /// Identifies a project on the CI/CD platform (`resource.project.id`).
    ///
    /// Used to build the "View Deployment" dashboard link.
    ProjectId
}

string_id! {
    /// Human-readable project name (`resource.project.name`).
    ProjectName
}

string_id! {
    /// Name of the environment the deployment targets (`resource.environment.name`),
    /// e.g. `"production"`.
    EnvironmentName
}

// ---------------------------------------------------------------------------
// Identifiers — chat destination
// ---------------------------------------------------------------------------

string_id! {
    /// Destination chat for notifications.
    ///
    /// Either a numeric chat id (`"-1001234567890"`) or a public channel
    /// username (`"@deployments"`); the Bot API accepts both as strings.
    ChatId
}

// ---------------------------------------------------------------------------
// Identifiers — UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Identifies one inbound webhook delivery.
///
/// Generated fresh for every request and recorded on its tracing span so the
/// receive, render, and send log lines of one delivery can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeliveryId(Uuid);

impl DeliveryId {
    /// Generates a new random delivery identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying [`Uuid`].
    pub fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for DeliveryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
