//! Inbound webhook payload parsing.
//!
//! The CI/CD platform posts a JSON document of roughly this shape:
//!
//! ```json
//! {
//!   "type": "Deployment.succeeded",
//!   "timestamp": "2023-11-14T22:13:20.000Z",
//!   "resource": {
//!     "project": { "id": "123", "name": "api" },
//!     "environment": { "name": "production" }
//!   },
//!   "details": { "status": "SUCCESS", "commitAuthor": "alice" }
//! }
//! ```
//!
//! Only `type` decides whether the event is forwarded; every other field is
//! optional and parsed leniently so that a platform schema change degrades the
//! message rather than dropping it.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::{EnvironmentName, EventType, ProjectId, ProjectName, RelayError, Timestamp};

/// Author shown when the payload does not name a commit author.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

// ---------------------------------------------------------------------------
// Domain event
// ---------------------------------------------------------------------------

/// A deployment-lifecycle notification, read from one webhook delivery.
///
/// Lives for a single request: it is parsed, rendered, and dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct DeploymentEvent {
    /// Dot-namespaced event type; always inside `Deployment.*`.
    pub event_type: EventType,
    /// Platform-supplied status (`details.status`), if any.
    pub status: Option<String>,
    pub project_name: Option<ProjectName>,
    pub project_id: Option<ProjectId>,
    pub environment_name: Option<EnvironmentName>,
    /// `details.commitAuthor`, or [`UNKNOWN_AUTHOR`] when absent or blank.
    pub commit_author: String,
    /// `None` when the payload has no timestamp or it cannot be interpreted.
    pub timestamp: Option<Timestamp>,
}

/// Result of parsing one webhook body.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    /// A `Deployment.*` event that should be forwarded.
    Deployment(DeploymentEvent),
    /// Any other event type, or a payload without a `type`.
    Unhandled {
        /// Raw `type` field, if the payload had one.
        event_type: Option<String>,
    },
}

/// Parses a raw webhook body.
///
/// # Errors
///
/// Returns [`RelayError::MalformedPayload`] if `body` is not a JSON object.
pub fn parse_event(body: &[u8]) -> Result<InboundEvent, RelayError> {
    let value: Value = serde_json::from_slice(body)?;
    if !value.is_object() {
        return Err(RelayError::MalformedPayload {
            message: "webhook body is not a JSON object".to_owned(),
        });
    }
    let payload: WirePayload = serde_json::from_value(value)?;

    let Some(event_type) = payload.event_type.map(EventType::new) else {
        return Ok(InboundEvent::Unhandled { event_type: None });
    };
    if !event_type.is_deployment() {
        return Ok(InboundEvent::Unhandled {
            event_type: Some(event_type.as_str().to_owned()),
        });
    }

    let resource = payload.resource.unwrap_or_default();
    let project = resource.project.unwrap_or_default();
    let environment = resource.environment.unwrap_or_default();
    let details = payload.details.unwrap_or_default();

    Ok(InboundEvent::Deployment(DeploymentEvent {
        event_type,
        status: details.status.filter(|s| !s.trim().is_empty()),
        project_name: project.name.and_then(ProjectName::new),
        project_id: project.id.and_then(ProjectId::new),
        environment_name: environment.name.and_then(EnvironmentName::new),
        commit_author: details
            .commit_author
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_owned()),
        timestamp: payload.timestamp.as_ref().and_then(timestamp_from_wire),
    }))
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct WirePayload {
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    event_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_object")]
    resource: Option<WireResource>,
    #[serde(default, deserialize_with = "lenient_object")]
    details: Option<WireDetails>,
    #[serde(default)]
    timestamp: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct WireResource {
    #[serde(default, deserialize_with = "lenient_object")]
    project: Option<WireProject>,
    #[serde(default, deserialize_with = "lenient_object")]
    environment: Option<WireEnvironment>,
}

#[derive(Debug, Default, Deserialize)]
struct WireProject {
    #[serde(default, deserialize_with = "lenient_string")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct WireEnvironment {
    #[serde(default, deserialize_with = "lenient_string")]
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct WireDetails {
    #[serde(default, deserialize_with = "lenient_string")]
    status: Option<String>,
    #[serde(rename = "commitAuthor", default, deserialize_with = "lenient_string")]
    commit_author: Option<String>,
}

/// Accepts strings and numbers as text; anything else (null, objects) is `None`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Accepts a JSON object of the expected shape; anything else (a string, an
/// array, an object with mistyped fields) is `None` instead of failing the
/// whole payload.
fn lenient_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(value @ Value::Object(_)) => serde_json::from_value(value).ok(),
        _ => None,
    })
}

fn timestamp_from_wire(value: &Value) -> Option<Timestamp> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(Timestamp::from_epoch_millis),
        Value::String(s) => Timestamp::parse(s),
        _ => None,
    }
}
