use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};

use crate::error::{RelayError, MISSING_TEXT};
use crate::models::{Message, SendMessageRequest, SendMessageResponse};
use crate::services::record_relay;
use crate::startup::AppState;

/// `POST /api/slack/send`: forward `text` to the configured webhook.
///
/// A body that is not a JSON object with a string `text` is treated the same
/// as a missing `text`; an oversized body keeps axum's 413.
#[tracing::instrument(skip_all)]
pub async fn send_message(
    State(state): State<AppState>,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<Json<SendMessageResponse>, RelayError> {
    let result = relay(&state, payload).await;

    match &result {
        Ok(_) => record_relay("sent"),
        Err(e) => record_relay(e.outcome()),
    }

    result
}

async fn relay(
    state: &AppState,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<Json<SendMessageResponse>, RelayError> {
    let Json(request) = payload.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            tracing::warn!(reason = %rejection.body_text(), "Message payload too large");
            return RelayError::Body(rejection);
        }
        tracing::debug!(reason = %rejection.body_text(), "Unreadable message payload");
        RelayError::Validation(MISSING_TEXT.to_string())
    })?;

    let message = Message::try_from(request)?;

    state.provider.send(&message).await.map_err(|e| {
        tracing::error!(
            provider = state.provider.name(),
            upstream_status = ?e.upstream_status(),
            error = %e,
            "Error sending to Slack"
        );
        RelayError::from(e)
    })?;

    Ok(Json(SendMessageResponse::sent()))
}
