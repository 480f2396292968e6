use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{RelayError, MISSING_TEXT};

/// Inbound body of `POST /api/slack/send`.
#[derive(Debug, Deserialize, Validate)]
pub struct SendMessageRequest {
    #[validate(required, length(min = 1))]
    pub text: Option<String>,
}

/// A validated message, ready to be forwarded. Only exists for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    text: String,
}

impl Message {
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl TryFrom<SendMessageRequest> for Message {
    type Error = RelayError;

    fn try_from(request: SendMessageRequest) -> Result<Self, Self::Error> {
        request
            .validate()
            .map_err(|_| RelayError::Validation(MISSING_TEXT.to_string()))?;

        // `required` already rejected `None`.
        let Some(text) = request.text else {
            return Err(RelayError::Validation(MISSING_TEXT.to_string()));
        };

        Ok(Message { text })
    }
}

#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    pub success: bool,
    pub message: String,
}

impl SendMessageResponse {
    pub fn sent() -> Self {
        Self {
            success: true,
            message: "Message sent to Slack".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn running(service_name: &str) -> Self {
        Self {
            status: format!("{} is running", service_name),
        }
    }
}
