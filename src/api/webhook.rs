//! Webhook handler relaying GitHub push events to the broker

use axum::{
    body::Bytes,
    extract::State as AxumState,
    http::{HeaderMap, StatusCode},
};
use tracing::{error, info};

use crate::error::SensorError;
use crate::event::{EventKind, WebhookEvent};
use crate::parser::parse_event;
use crate::{AppState, PUSH_EVENT_CHANNEL, SharedState};

/// Event kinds this sensor asks the parser for.
const ACCEPTED_EVENTS: &[EventKind] = &[EventKind::Push, EventKind::Repository];

/// Handles the GitHub webhook POST request.
///
/// Verifies and decodes the delivery, then dispatches on its kind:
/// push events are republished to the broker, repository events are
/// logged, anything else is dropped without an error to the sender.
pub async fn handle_webhook(
    AxumState(state): AxumState<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    let event = match parse_event(
        &headers,
        &body,
        state.config.webhook_secret.as_deref(),
        ACCEPTED_EVENTS,
    ) {
        Ok(event) => event,
        Err(e) if e.is_benign() => {
            info!("Ignoring delivery: {}", e);
            return StatusCode::NO_CONTENT;
        }
        Err(e @ (SensorError::MissingSignature | SensorError::InvalidSignature)) => {
            error!("Rejecting delivery: {}", e);
            return StatusCode::UNAUTHORIZED;
        }
        Err(e) => {
            error!("Could not parse delivery: {}", e);
            return StatusCode::BAD_REQUEST;
        }
    };

    match dispatch_event(&state, event).await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            error!("Failed to relay push event: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Routes a parsed payload to its handling branch.
async fn dispatch_event(state: &AppState, event: WebhookEvent) -> Result<(), SensorError> {
    match event {
        WebhookEvent::Repository(payload) => {
            // Observational only; nothing downstream consumes these yet.
            info!("Repository event: {:?}", payload);
            Ok(())
        }
        WebhookEvent::Push(payload) => state.broker.publish(PUSH_EVENT_CHANNEL, payload).await,
    }
}
