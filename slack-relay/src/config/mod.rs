use secrecy::{ExposeSecret, Secret};
use service_core::config::{self as core_config, get_env, is_production, non_empty_var};
use service_core::error::AppError;
use std::time::Duration;

/// Stand-in target used in development when no webhook is configured.
/// Every forward attempt against it fails upstream.
pub const PLACEHOLDER_WEBHOOK_URL: &str = "https://hooks.slack.com/services/YOUR/WEBHOOK/URL";

pub const DEFAULT_SERVICE_NAME: &str = "AutoStand proxy server";

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub common: core_config::Config,
    /// Name reported by the status endpoint.
    pub service_name: String,
    pub slack: SlackConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone)]
pub struct SlackConfig {
    /// Incoming webhook URL. It embeds the credential, so it stays wrapped.
    pub webhook_url: Secret<String>,
    /// Upper bound on a single outbound call.
    pub timeout: Duration,
}

impl SlackConfig {
    pub fn uses_placeholder(&self) -> bool {
        self.webhook_url.expose_secret() == PLACEHOLDER_WEBHOOK_URL
    }
}

#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
}

impl RelayConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        let is_prod = is_production();

        let timeout_secs = get_env("SLACK_TIMEOUT_SECS", Some("10"), false)?;
        let timeout_secs: u64 = timeout_secs.parse().map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!(
                "SLACK_TIMEOUT_SECS must be a whole number of seconds, got {:?}: {}",
                timeout_secs,
                e
            ))
        })?;

        Ok(RelayConfig {
            common,
            service_name: get_env("SERVICE_NAME", Some(DEFAULT_SERVICE_NAME), false)?,
            slack: SlackConfig {
                webhook_url: Secret::new(get_env(
                    "SLACK_WEBHOOK_URL",
                    Some(PLACEHOLDER_WEBHOOK_URL),
                    is_prod,
                )?),
                timeout: Duration::from_secs(timeout_secs),
            },
            observability: ObservabilityConfig {
                log_level: get_env("LOG_LEVEL", Some("info"), false)?,
                otlp_endpoint: non_empty_var("OTLP_ENDPOINT"),
            },
        })
    }
}
