pub mod slack;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::Message;

pub use slack::{MockWebhookProvider, SlackWebhookProvider};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Transport failure before any response arrived.
    #[error("{0}")]
    Connection(String),

    #[error("timeout of {0}ms exceeded")]
    Timeout(u128),

    /// The webhook answered with a non-2xx status. `body` is kept for logs only.
    #[error("Request failed with status code {status}")]
    Rejected { status: u16, body: String },
}

impl ProviderError {
    /// HTTP status returned by the webhook, when it answered at all.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            ProviderError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Outbound chat webhook. One call to `send` is exactly one delivery attempt.
#[async_trait]
pub trait WebhookProvider: Send + Sync {
    async fn send(&self, message: &Message) -> Result<(), ProviderError>;
    fn name(&self) -> &'static str;
}
