use anyhow::Context;
use service_core::observability::init_tracing;
use slack_relay::config::RelayConfig;
use slack_relay::services::init_metrics;
use slack_relay::startup::Application;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = RelayConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        "slack-relay",
        &config.observability.log_level,
        config.observability.otlp_endpoint.as_deref(),
    );

    if let Err(e) = init_metrics() {
        tracing::warn!("Metrics disabled: {}", e);
    }

    if config.slack.uses_placeholder() {
        tracing::warn!(
            "SLACK_WEBHOOK_URL is not set; messages will be posted to a placeholder URL and fail"
        );
    }

    let service_name = config.service_name.clone();
    let app = Application::build(config)
        .await
        .context("Failed to build application")?;

    tracing::info!("{} running on port {}", service_name, app.port());
    tracing::info!("CORS enabled for all origins");

    app.run_until_stopped().await.map_err(|e| {
        tracing::error!("Server error: {}", e);
        anyhow::anyhow!("Server error: {}", e)
    })?;

    Ok(())
}
