use super::{ProviderError, WebhookProvider};
use crate::config::SlackConfig;
use crate::models::Message;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::Serialize;
use std::sync::Mutex;

/// Slack incoming-webhook body. Slack needs nothing beyond `text`.
#[derive(Debug, Serialize)]
struct SlackPayload<'a> {
    text: &'a str,
}

pub struct SlackWebhookProvider {
    config: SlackConfig,
    client: Client,
}

impl SlackWebhookProvider {
    pub fn new(config: SlackConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn transport_error(&self, err: reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            return ProviderError::Timeout(self.config.timeout.as_millis());
        }
        // The URL carries the webhook credential; keep it out of messages.
        ProviderError::Connection(error_chain(&err.without_url()))
    }
}

fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[async_trait]
impl WebhookProvider for SlackWebhookProvider {
    async fn send(&self, message: &Message) -> Result<(), ProviderError> {
        let response = self
            .client
            .post(self.config.webhook_url.expose_secret())
            .json(&SlackPayload {
                text: message.text(),
            })
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                status = status.as_u16(),
                body = %body,
                "Slack webhook rejected message"
            );
            return Err(ProviderError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(
            status = status.as_u16(),
            text_length = message.text().len(),
            "Message delivered to Slack webhook"
        );

        Ok(())
    }

    fn name(&self) -> &'static str {
        "slack"
    }
}

/// Mock webhook for testing. Records every attempt.
pub struct MockWebhookProvider {
    reject_with: Option<u16>,
    sent: Mutex<Vec<String>>,
}

impl MockWebhookProvider {
    /// Accepts every message.
    pub fn new() -> Self {
        Self {
            reject_with: None,
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Answers every message with the given upstream status.
    pub fn rejecting(status: u16) -> Self {
        Self {
            reject_with: Some(status),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn send_count(&self) -> usize {
        self.sent_texts().len()
    }

    pub fn sent_texts(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Default for MockWebhookProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WebhookProvider for MockWebhookProvider {
    async fn send(&self, message: &Message) -> Result<(), ProviderError> {
        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(message.text().to_string());

        tracing::info!(
            text_length = message.text().len(),
            "[MOCK] Message would be sent to Slack"
        );

        match self.reject_with {
            Some(status) => Err(ProviderError::Rejected {
                status,
                body: "mock rejection".to_string(),
            }),
            None => Ok(()),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
