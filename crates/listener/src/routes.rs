//! HTTP routes: `POST /webhook` plus 405 for everything else.

use actix_web::http::header::ContentType;
use actix_web::{web, HttpRequest, HttpResponse};
use tracing::{debug, info_span, Instrument};

use relay::{DeliveryId, Disposition, Relay};

use crate::ListenerError;

/// Path the CI/CD platform posts deployment webhooks to.
pub const WEBHOOK_PATH: &str = "/webhook";

/// Body of every 405 response.
pub const METHOD_NOT_ALLOWED_BODY: &str =
    "405 Method Not Allowed. Deployment webhooks must be sent as POST /webhook.";

/// Registers the relay routes. Expects a `web::Data<Relay>` in app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource(WEBHOOK_PATH)
            .route(web::post().to(receive_webhook))
            .default_service(web::to(method_not_allowed)),
    )
    .default_service(web::to(method_not_allowed));
}

/// Hands the raw body to the relay. 200 for delivered or ignored events,
/// 500 (via [`ListenerError`]) when the notification could not be sent.
async fn receive_webhook(
    relay: web::Data<Relay>,
    body: web::Bytes,
) -> Result<HttpResponse, ListenerError> {
    let delivery_id = DeliveryId::new_random();
    let span = info_span!("webhook", delivery_id = %delivery_id);

    let disposition = relay.handle(&body).instrument(span).await?;
    if let Disposition::Ignored(reason) = &disposition {
        debug!(%delivery_id, ?reason, "Acknowledged without notification");
    }

    Ok(HttpResponse::Ok()
        .insert_header(ContentType::plaintext())
        .body("OK"))
}

async fn method_not_allowed(req: HttpRequest) -> HttpResponse {
    debug!(method = %req.method(), path = req.path(), "Rejecting request");
    HttpResponse::MethodNotAllowed()
        .insert_header(ContentType::plaintext())
        .body(METHOD_NOT_ALLOWED_BODY)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use async_trait::async_trait;

    use relay::{MessageRenderer, Notification, Notifier, NotifyError, TimeDisplay};

    use super::*;

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

    struct UnreachableNotifier;

    #[async_trait]
    impl Notifier for UnreachableNotifier {
        async fn send(&self, _: &Notification) -> Result<(), NotifyError> {
            Err(NotifyError::Transport {
                message: "connection refused".to_owned(),
            })
        }
    }

    const SUCCEEDED: &str = r#"{"type":"Deployment.succeeded","resource":{"project":{"name":"api","id":"123"},"environment":{"name":"prod"}},"details":{"commitAuthor":"alice"},"timestamp":1700000000000}"#;

    fn relay_data(notifier: Arc<dyn Notifier>) -> web::Data<Relay> {
        let renderer = MessageRenderer::new("https://railway.app", TimeDisplay::utc()).unwrap();
        web::Data::new(Relay::new(notifier, renderer))
    }

    async fn post(notifier: Arc<dyn Notifier>, body: &'static str) -> (StatusCode, String) {
        let app = test::init_service(
            App::new()
                .app_data(relay_data(notifier))
                .configure(configure),
        )
        .await;
        let req = test::TestRequest::post()
            .uri(WEBHOOK_PATH)
            .insert_header(ContentType::json())
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        let body = test::read_body(resp).await;
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[actix_web::test]
    async fn deployment_event_is_forwarded() {
        let notifier = Arc::new(RecordingNotifier::default());

        let (status, body) = post(notifier.clone(), SUCCEEDED).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].text.contains("✅ Status: <code>SUCCESS</code>"));
        assert!(sent[0].button.url.contains("123"));
    }

    #[actix_web::test]
    async fn other_event_types_are_acknowledged_without_sending() {
        let notifier = Arc::new(RecordingNotifier::default());

        let (status, _) = post(notifier.clone(), r#"{"type":"VolumeAlert.triggered"}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn malformed_body_is_acknowledged_without_sending() {
        let notifier = Arc::new(RecordingNotifier::default());

        let (status, _) = post(notifier.clone(), "{not json").await;

        assert_eq!(status, StatusCode::OK);
        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn send_failure_returns_500() {
        let (status, body) = post(Arc::new(UnreachableNotifier), SUCCEEDED).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "Internal Server Error");
    }

    #[actix_web::test]
    async fn other_methods_and_paths_return_405() {
        let app = test::init_service(
            App::new()
                .app_data(relay_data(Arc::new(RecordingNotifier::default())))
                .configure(configure),
        )
        .await;

        let requests = [
            test::TestRequest::get().uri("/").to_request(),
            test::TestRequest::get().uri(WEBHOOK_PATH).to_request(),
            test::TestRequest::put().uri(WEBHOOK_PATH).to_request(),
            test::TestRequest::post().uri("/elsewhere").to_request(),
        ];
        for req in requests {
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
            let body = test::read_body(resp).await;
            assert_eq!(body, METHOD_NOT_ALLOWED_BODY.as_bytes());
        }
    }
}
