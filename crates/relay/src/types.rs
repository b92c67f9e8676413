//! Shared value types for the relay domain.
//!
//! Unlike the newtype identifiers in [`crate::identifiers`], these types carry
//! behaviour: [`EventType`] knows its namespace, [`Timestamp`] knows its wire
//! encodings, and [`TimeDisplay`] knows how a timestamp is shown to humans.

use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Local, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::RelayError;

// ---------------------------------------------------------------------------
// Event type
// ---------------------------------------------------------------------------

/// Namespace prefix shared by every deployment-lifecycle event.
pub const DEPLOYMENT_NAMESPACE: &str = "Deployment.";

/// Dot-namespaced webhook event type, e.g. `"Deployment.succeeded"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventType(String);

impl EventType {
    /// Creates an [`EventType`] from the raw `type` field of a payload.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the event type as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if this event belongs to the `Deployment.*` namespace.
    pub fn is_deployment(&self) -> bool {
        self.0.starts_with(DEPLOYMENT_NAMESPACE)
    }

    /// Returns the part after `Deployment.` (e.g. `"succeeded"`), or `None`
    /// for events outside the deployment namespace.
    pub fn deployment_phase(&self) -> Option<&str> {
        self.0.strip_prefix(DEPLOYMENT_NAMESPACE)
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp supplied by the CI/CD platform.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a [`Timestamp`] from milliseconds since the Unix epoch.
    ///
    /// Returns `None` if the value is outside chrono's representable range.
    pub fn from_epoch_millis(millis: i64) -> Option<Self> {
        DateTime::from_timestamp_millis(millis).map(Self)
    }

    /// Parses a textual timestamp: RFC 3339 (`"2023-11-14T22:13:20.000Z"`) or
    /// a decimal count of epoch milliseconds.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Some(Self(dt.with_timezone(&Utc)));
        }
        text.parse::<i64>().ok().and_then(Self::from_epoch_millis)
    }

    /// Creates a [`Timestamp`] from a [`DateTime<Utc>`].
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the underlying [`DateTime<Utc>`].
    pub fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

// ---------------------------------------------------------------------------

/// en-US locale layout, e.g. `11/14/2023, 10:13:20 PM`.
const DISPLAY_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Time zone in which timestamps are shown in chat messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeDisplay {
    /// The relay host's local time zone.
    #[default]
    Local,
    /// A fixed offset from UTC.
    Fixed(FixedOffset),
}

impl TimeDisplay {
    /// Shorthand for a zero UTC offset.
    pub fn utc() -> Self {
        Self::Fixed(Utc.fix())
    }

    /// Renders `timestamp` in this zone using the en-US layout.
    pub fn render(self, timestamp: Timestamp) -> String {
        let dt = timestamp.as_datetime();
        match self {
            Self::Local => dt.with_timezone(&Local).format(DISPLAY_FORMAT).to_string(),
            Self::Fixed(offset) => dt.with_timezone(&offset).format(DISPLAY_FORMAT).to_string(),
        }
    }
}

impl FromStr for TimeDisplay {
    type Err = RelayError;

    /// Accepts `Z`, `UTC`, `local`, `+HH:MM`, `-HH:MM`, `+HHMM` or `+HH`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "z" | "utc" => return Ok(Self::utc()),
            "local" => return Ok(Self::Local),
            _ => {}
        }

        let invalid = || RelayError::Configuration {
            message: format!("invalid UTC offset '{s}'; expected e.g. '+05:30', '-08:00' or 'UTC'"),
        };

        let (sign, rest) = match s.as_bytes().first() {
            Some(b'+') => (1, &s[1..]),
            Some(b'-') => (-1, &s[1..]),
            _ => return Err(invalid()),
        };
        let digits: String = rest.chars().filter(|c| *c != ':').collect();
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let (hours, minutes) = match digits.len() {
            2 => (&digits[..2], "0"),
            4 => (&digits[..2], &digits[2..]),
            _ => return Err(invalid()),
        };
        let hours: i32 = hours.parse().map_err(|_| invalid())?;
        let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
        if hours > 23 || minutes > 59 {
            return Err(invalid());
        }

        FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
            .map(Self::Fixed)
            .ok_or_else(invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_namespace() {
        let event = EventType::new("Deployment.succeeded");
        assert!(event.is_deployment());
        assert_eq!(event.deployment_phase(), Some("succeeded"));

        let other = EventType::new("VolumeAlert.triggered");
        assert!(!other.is_deployment());
        assert_eq!(other.deployment_phase(), None);
    }

    #[test]
    fn timestamp_parses_rfc3339_and_millis() {
        let from_text = Timestamp::parse("2023-11-14T22:13:20.000Z").unwrap();
        let from_millis = Timestamp::from_epoch_millis(1_700_000_000_000).unwrap();
        assert_eq!(from_text, from_millis);
        assert_eq!(Timestamp::parse("1700000000000"), Some(from_millis));
        assert_eq!(Timestamp::parse("yesterday"), None);
    }

    #[test]
    fn renders_en_us_layout() {
        let ts = Timestamp::from_epoch_millis(1_700_000_000_000).unwrap();
        assert_eq!(TimeDisplay::utc().render(ts), "11/14/2023, 10:13:20 PM");

        let ist: TimeDisplay = "+05:30".parse().unwrap();
        assert_eq!(ist.render(ts), "11/15/2023, 3:43:20 AM");
    }

    #[test]
    fn parses_offsets() {
        assert_eq!("UTC".parse::<TimeDisplay>().unwrap(), TimeDisplay::utc());
        assert_eq!("local".parse::<TimeDisplay>().unwrap(), TimeDisplay::Local);
        assert_eq!(
            "-0800".parse::<TimeDisplay>().unwrap(),
            TimeDisplay::Fixed(FixedOffset::west_opt(8 * 3600).unwrap())
        );
        assert_eq!(
            "+02".parse::<TimeDisplay>().unwrap(),
            TimeDisplay::Fixed(FixedOffset::east_opt(2 * 3600).unwrap())
        );
    }

    #[test]
    fn rejects_bad_offsets() {
        for bad in ["", "05:30", "+5:3", "+25:00", "+05:75", "+ab:cd", "Europe/Paris"] {
            assert!(bad.parse::<TimeDisplay>().is_err(), "{bad} should be rejected");
        }
    }
}
