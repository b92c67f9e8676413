//! The relay service: one webhook body in, at most one notification out.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::{parse_event, InboundEvent, MessageRenderer, Notifier, RelayError};

/// What happened to a delivery that was handled without error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// A notification was sent for this deployment event.
    Delivered {
        /// The forwarded event type, e.g. `"Deployment.succeeded"`.
        event_type: String,
    },
    /// Nothing was sent.
    Ignored(IgnoreReason),
}

/// Why a delivery was acknowledged without sending anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The event type is outside `Deployment.*` (or missing).
    UnhandledEventType(Option<String>),
    /// The body could not be parsed.
    MalformedPayload,
}

/// Stateless translator from webhook bodies to chat notifications.
///
/// Shared read-only between concurrent requests; holds no per-request state.
pub struct Relay {
    notifier: Arc<dyn Notifier>,
    renderer: MessageRenderer,
}

impl Relay {
    pub fn new(notifier: Arc<dyn Notifier>, renderer: MessageRenderer) -> Self {
        Self { notifier, renderer }
    }

    /// Handles one webhook body.
    ///
    /// Malformed and non-deployment payloads are logged and reported as
    /// [`Disposition::Ignored`]; they are not errors for the caller.
    ///
    /// # Errors
    ///
    /// [`RelayError::Delivery`] when the notifier fails. The failure is
    /// logged here with the provider's detail; nothing is retried.
    pub async fn handle(&self, body: &[u8]) -> Result<Disposition, RelayError> {
        info!(payload = %String::from_utf8_lossy(body), "Received webhook payload");

        let event = match parse_event(body) {
            Ok(InboundEvent::Deployment(event)) => event,
            Ok(InboundEvent::Unhandled { event_type }) => {
                info!(event_type = ?event_type, "Unhandled event type");
                return Ok(Disposition::Ignored(IgnoreReason::UnhandledEventType(event_type)));
            }
            Err(err) => {
                warn!(error = %err, "Ignoring malformed webhook payload");
                return Ok(Disposition::Ignored(IgnoreReason::MalformedPayload));
            }
        };

        info!(
            event_type = %event.event_type,
            project = ?event.project_name.as_ref().map(|p| p.as_str()),
            environment = ?event.environment_name.as_ref().map(|e| e.as_str()),
            "Received deployment event"
        );

        let notification = self.renderer.render(&event);
        if let Err(err) = self.notifier.send(&notification).await {
            error!(event_type = %event.event_type, error = %err, "Failed to send notification");
            return Err(err.into());
        }

        info!(event_type = %event.event_type, "Notification sent");
        Ok(Disposition::Delivered {
            event_type: event.event_type.as_str().to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::{Notification, NotifyError, TimeDisplay};

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<Notification>>,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
            self.sent.lock().unwrap().push(notification.clone());
            Ok(())
        }
    }

    struct RejectingNotifier;

    #[async_trait]
    impl Notifier for RejectingNotifier {
        async fn send(&self, _: &Notification) -> Result<(), NotifyError> {
            Err(NotifyError::Rejected {
                status: 400,
                description: "Bad Request: chat not found".to_owned(),
            })
        }
    }

    fn relay(notifier: Arc<dyn Notifier>) -> Relay {
        let renderer = MessageRenderer::new("https://railway.app", TimeDisplay::utc()).unwrap();
        Relay::new(notifier, renderer)
    }

    #[tokio::test]
    async fn forwards_deployment_events() {
        let notifier = Arc::new(RecordingNotifier::default());
        let relay = relay(notifier.clone());

        let outcome = relay
            .handle(br#"{"type":"Deployment.succeeded","resource":{"project":{"name":"api","id":"123"}}}"#)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            Disposition::Delivered {
                event_type: "Deployment.succeeded".to_owned()
            }
        );
        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].text.contains("✅ Status: <code>SUCCESS</code>"));
        assert_eq!(sent[0].button.url, "https://railway.app/project/123/");
    }

    #[tokio::test]
    async fn degraded_payload_is_still_forwarded() {
        let notifier = Arc::new(RecordingNotifier::default());
        let relay = relay(notifier.clone());

        let outcome = relay
            .handle(br#"{"type":"Deployment.succeeded","resource":{"project":"api"},"details":"x"}"#)
            .await
            .unwrap();

        assert!(matches!(outcome, Disposition::Delivered { .. }));
        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].text.starts_with("<b>Deployment: Unknown</b>"));
        assert!(sent[0].text.contains("👨‍💻 Author: <code>Unknown</code>"));
    }

    #[tokio::test]
    async fn ignores_other_event_types_without_sending() {
        let notifier = Arc::new(RecordingNotifier::default());
        let relay = relay(notifier.clone());

        let outcome = relay.handle(br#"{"type":"VolumeAlert.triggered"}"#).await.unwrap();

        assert_eq!(
            outcome,
            Disposition::Ignored(IgnoreReason::UnhandledEventType(Some(
                "VolumeAlert.triggered".to_owned()
            )))
        );
        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn ignores_malformed_bodies_without_sending() {
        let notifier = Arc::new(RecordingNotifier::default());
        let relay = relay(notifier.clone());

        let outcome = relay.handle(b"payload=not-json").await.unwrap();

        assert_eq!(outcome, Disposition::Ignored(IgnoreReason::MalformedPayload));
        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn send_failure_is_a_delivery_error() {
        let relay = relay(Arc::new(RejectingNotifier));

        let err = relay
            .handle(br#"{"type":"Deployment.failed"}"#)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RelayError::Delivery(NotifyError::Rejected { status: 400, .. })
        ));
    }
}
