//! Inbound webhook verification and payload decoding

use axum::http::HeaderMap;
use tracing::debug;

use crate::error::SensorError;
use crate::event::{EventKind, PushPayload, RepositoryPayload, WebhookEvent};
use crate::utils::verify_github_signature;

/// Header naming the event kind of a delivery.
pub const EVENT_HEADER: &str = "X-GitHub-Event";
/// Header carrying the HMAC-SHA256 body signature.
pub const SIGNATURE_HEADER: &str = "X-Hub-Signature-256";

/// Validates a webhook delivery and decodes it into a typed payload.
///
/// `accepted` is the whitelist of kinds the caller wants parsed; a
/// delivery for any other kind fails with
/// [`SensorError::UnsupportedEvent`], which callers treat as benign.
/// Passing `None` for `secret` disables signature verification; with a
/// secret, the signature is checked before the body is decoded.
pub fn parse_event(
    headers: &HeaderMap,
    body: &[u8],
    secret: Option<&str>,
    accepted: &[EventKind],
) -> Result<WebhookEvent, SensorError> {
    let event_name = headers
        .get(EVENT_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(SensorError::MissingEventHeader)?;

    let kind = EventKind::from_header(event_name)
        .filter(|kind| accepted.contains(kind))
        .ok_or_else(|| SensorError::UnsupportedEvent(event_name.to_string()))?;

    if let Some(secret) = secret {
        let signature = headers
            .get(SIGNATURE_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(SensorError::MissingSignature)?;
        if !verify_github_signature(secret, body, signature) {
            return Err(SensorError::InvalidSignature);
        }
    }

    let event = match kind {
        EventKind::Push => WebhookEvent::Push(serde_json::from_slice::<PushPayload>(body)?),
        EventKind::Repository => {
            WebhookEvent::Repository(serde_json::from_slice::<RepositoryPayload>(body)?)
        }
    };
    debug!("Parsed {} event", event.kind().as_str());

    Ok(event)
}
