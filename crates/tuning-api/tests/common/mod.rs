//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;
use tuning_api::line::signature::SignatureVerifier;
use tuning_api::state::AppState;
use tuning_conversation::application::dispatcher::{ConversationSettings, Dispatcher};
use tuning_core::delivery::ReplySender;
use tuning_core::entitlement::{EntitlementClient, EntitlementStore};
use tuning_test_support::sample_catalog;

/// Channel secret shared by the test app and the request signer.
pub const CHANNEL_SECRET: &str = "test-channel-secret";

/// Build the full app router over the sample catalog with the given
/// collaborators. Uses the same route structure as `main.rs`.
pub fn build_test_app(
    store: Arc<dyn EntitlementStore>,
    sender: Arc<dyn ReplySender>,
) -> Router {
    let catalog = Arc::new(sample_catalog());
    let settings = ConversationSettings {
        upsell_url: "https://example.com/unlock".to_owned(),
        ..ConversationSettings::default()
    };
    let dispatcher = Dispatcher::new(
        Arc::clone(&catalog),
        &settings,
        EntitlementClient::new(store, Duration::from_secs(1)),
        sender,
    );
    let app_state = AppState::new(
        dispatcher,
        SignatureVerifier::new(CHANNEL_SECRET),
        catalog,
        "0".repeat(64),
    );
    tuning_api::build_router(app_state)
}

/// A webhook body carrying one text message per `(user, text, token)`.
pub fn text_events(events: &[(&str, &str, &str)]) -> serde_json::Value {
    let events: Vec<serde_json::Value> = events
        .iter()
        .map(|(user, text, token)| {
            serde_json::json!({
                "type": "message",
                "mode": "active",
                "timestamp": 1_735_689_600_000_u64,
                "replyToken": token,
                "source": { "type": "user", "userId": user },
                "message": { "id": "1", "type": "text", "text": text }
            })
        })
        .collect();
    serde_json::json!({ "destination": "Ubot", "events": events })
}

/// Send a POST /callback request with `body`, signed with `signature` or,
/// if `None`, correctly signed with `CHANNEL_SECRET`. Returns the status
/// and the raw response body.
pub async fn post_webhook(
    app: Router,
    body: &[u8],
    signature: Option<&str>,
) -> (StatusCode, String) {
    let signature = signature.map_or_else(
        || SignatureVerifier::new(CHANNEL_SECRET).sign(body),
        str::to_owned,
    );
    let request = Request::builder()
        .method("POST")
        .uri("/callback")
        .header("content-type", "application/json")
        .header("x-line-signature", signature)
        .body(Body::from(body.to_vec()))
        .unwrap();

    send(app, request).await
}

/// Send a request and return its status and body text.
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body_bytes.to_vec()).unwrap())
}

/// Send a GET request and return the JSON response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(app, request).await;
    (status, serde_json::from_str(&body).unwrap())
}
