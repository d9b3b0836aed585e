//! Webhook endpoint for the messaging platform.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::{Router, routing::post};
use tracing::{debug, info, instrument};

use crate::error::ApiError;
use crate::line::signature::SIGNATURE_HEADER;
use crate::line::webhook::WebhookPayload;
use crate::state::AppState;

/// POST /callback
///
/// Answers `200 OK` once the delivery is authentic and well-formed; the
/// outcome of individual replies does not change the response.
#[instrument(skip_all, fields(body_len = body.len()))]
async fn callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<&'static str, ApiError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or(ApiError::MissingSignature)?;

    if !state.verifier.verify(&body, signature) {
        return Err(ApiError::InvalidSignature);
    }

    let payload: WebhookPayload =
        serde_json::from_slice(&body).map_err(|e| ApiError::MalformedPayload(e.to_string()))?;

    info!(events = payload.events.len(), "webhook received");

    for event in payload.events {
        let kind = event.kind.clone();
        match event.into_inbound() {
            Some(inbound) => {
                state.dispatcher.dispatch(&inbound).await;
            }
            None => debug!(kind = %kind, "ignoring event that is not a user text message"),
        }
    }

    Ok("OK")
}

/// Returns the webhook router.
pub fn router() -> Router<AppState> {
    Router::new().route("/callback", post(callback))
}
