//! Event type → status display mapping.

use crate::EventType;

/// Emoji and status label shown on the status line of a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusDisplay {
    pub emoji: &'static str,
    pub label: String,
}

/// Emoji used for deployment phases with no dedicated entry.
pub const FALLBACK_EMOJI: &str = "ℹ️";

const KNOWN_PHASES: &[(&str, &str, &str)] = &[
    ("Deployment.succeeded", "✅", "SUCCESS"),
    ("Deployment.building", "⚒️", "BUILDING"),
    ("Deployment.deploying", "🚀", "DEPLOYING"),
    ("Deployment.failed", "❌", "FAILED"),
    ("Deployment.crashed", "❌", "FAILED"),
];

/// Maps an event type (and the platform's own status, if any) to its display.
///
/// Known types come from a fixed table. Anything else falls back to
/// [`FALLBACK_EMOJI`] and an uppercased label: the platform status when it
/// sent one, otherwise the event type with its `Deployment.` prefix removed.
pub fn describe(event_type: &EventType, status: Option<&str>) -> StatusDisplay {
    if let Some((_, emoji, label)) = KNOWN_PHASES
        .iter()
        .find(|(known, _, _)| *known == event_type.as_str())
    {
        return StatusDisplay {
            emoji: *emoji,
            label: (*label).to_owned(),
        };
    }

    // A non-blank platform status takes precedence over the stripped phase.
    let raw = status
        .filter(|s| !s.trim().is_empty())
        .or_else(|| event_type.deployment_phase())
        .unwrap_or_else(|| event_type.as_str());

    StatusDisplay {
        emoji: FALLBACK_EMOJI,
        label: raw.trim().to_uppercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn display(event_type: &str) -> StatusDisplay {
        describe(&EventType::new(event_type), None)
    }

    #[test]
    fn known_types_use_the_table() {
        let expected = [
            ("Deployment.succeeded", "✅", "SUCCESS"),
            ("Deployment.building", "⚒️", "BUILDING"),
            ("Deployment.deploying", "🚀", "DEPLOYING"),
            ("Deployment.failed", "❌", "FAILED"),
            ("Deployment.crashed", "❌", "FAILED"),
        ];
        for (event_type, emoji, label) in expected {
            let got = display(event_type);
            assert_eq!(got.emoji, emoji, "{event_type}");
            assert_eq!(got.label, label, "{event_type}");
        }
    }

    #[test]
    fn table_ignores_platform_status() {
        let got = describe(&EventType::new("Deployment.failed"), Some("REMOVED"));
        assert_eq!(got.label, "FAILED");
    }

    #[test]
    fn unknown_phase_strips_prefix_and_uppercases() {
        let got = display("Deployment.removed");
        assert_eq!(got.emoji, FALLBACK_EMOJI);
        assert_eq!(got.label, "REMOVED");

        assert_eq!(display("Deployment.slept").label, "SLEPT");
        assert_eq!(display("Deployment.").label, "");
    }

    #[test]
    fn unknown_phase_prefers_platform_status() {
        let got = describe(&EventType::new("Deployment.queued"), Some("initializing"));
        assert_eq!(got.emoji, FALLBACK_EMOJI);
        assert_eq!(got.label, "INITIALIZING");

        let blank = describe(&EventType::new("Deployment.queued"), Some("  "));
        assert_eq!(blank.label, "QUEUED");
    }
}
