pub mod metrics;
pub mod providers;

pub use self::metrics::{init_metrics, record_relay, render_metrics};
pub use providers::{
    MockWebhookProvider, ProviderError, SlackWebhookProvider, WebhookProvider,
};
