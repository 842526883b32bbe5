mod health;
mod metrics;
mod webhook;

pub use health::health_handler;
pub use metrics::metrics_handler;
pub use webhook::{RATE_LIMITED_TEXT, webhook_handler};
