use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::ProviderError;

pub const MISSING_TEXT: &str = "Message text is required";
pub const SEND_FAILED: &str = "Failed to send message to Slack";

/// Failures at the request-handling boundary of the relay.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Inbound payload rejected before any outbound call.
    #[error("{0}")]
    Validation(String),

    /// Body refused by the transport layer itself (e.g. over the size limit).
    /// Rendered with axum's own status and text.
    #[error("{0}")]
    Body(JsonRejection),

    /// The single outbound attempt failed.
    #[error("Failed to send message to Slack: {0}")]
    Upstream(#[from] ProviderError),
}

impl RelayError {
    /// Label value for `slack_relay_messages_total`.
    pub fn outcome(&self) -> &'static str {
        match self {
            RelayError::Validation(_) | RelayError::Body(_) => "rejected",
            RelayError::Upstream(_) => "failed",
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        match self {
            RelayError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            RelayError::Body(rejection) => rejection.into_response(),
            RelayError::Upstream(err) => {
                let mut details = err.to_string();
                if details.is_empty() {
                    details = "Unknown error".to_string();
                }

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "success": false,
                        "error": SEND_FAILED,
                        "details": details,
                    })),
                )
                    .into_response()
            }
        }
    }
}
