//! HTTP handlers for slack-relay.

pub mod health;
pub mod metrics;
pub mod slack;

pub use health::{health_check, status};
pub use self::metrics::metrics;
pub use slack::send_message;
