use secrecy::Secret;
use service_core::config::Config as CoreConfig;
use slack_relay::config::{ObservabilityConfig, RelayConfig, SlackConfig};
use slack_relay::startup::Application;
use std::time::Duration;
use wiremock::MockServer;

pub const WEBHOOK_PATH: &str = "/services/T000/B000/XXXXXXXX";

pub fn test_config(webhook_url: String, timeout: Duration) -> RelayConfig {
    RelayConfig {
        // Use random port for testing (port 0)
        common: CoreConfig { port: 0 },
        service_name: "AutoStand proxy server".to_string(),
        slack: SlackConfig {
            webhook_url: Secret::new(webhook_url),
            timeout,
        },
        observability: ObservabilityConfig {
            log_level: "debug".to_string(),
            otlp_endpoint: None,
        },
    }
}

pub struct TestApp {
    pub address: String,
    /// Stands in for the Slack incoming webhook.
    pub webhook: MockServer,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_timeout(Duration::from_secs(5)).await
    }

    pub async fn spawn_with_timeout(timeout: Duration) -> Self {
        let webhook = MockServer::start().await;
        let config = test_config(format!("{}{}", webhook.uri(), WEBHOOK_PATH), timeout);

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let address = format!("http://127.0.0.1:{}", app.port());

        // The listener is already bound, so requests queue until serving starts.
        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        TestApp {
            address,
            webhook,
            client: reqwest::Client::new(),
        }
    }

    pub async fn post_message(&self, body: &serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}/api/slack/send", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }
}
