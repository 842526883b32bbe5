use lazy_static::lazy_static;
use prometheus::{Counter, Gauge, Histogram, register_counter, register_gauge, register_histogram};


lazy_static! {
    pub static ref WEBHOOK_REQUESTS: Counter =
        register_counter!("relay_webhook_requests_total", "Total number of inbound webhook posts").unwrap();
    pub static ref RATE_LIMITED: Counter =
        register_counter!("relay_rate_limited_total", "Webhook posts rejected by the rate gate").unwrap();
    pub static ref UPSTREAM_FAILURES: Counter =
        register_counter!("relay_upstream_failures_total", "Completion calls that failed").unwrap();
    pub static ref EMPTY_REPLIES: Counter =
        register_counter!("relay_empty_replies_total", "Completion calls that returned no usable text").unwrap();
    pub static ref UPSTREAM_LATENCY: Histogram = register_histogram!(
        "relay_upstream_latency_seconds",
        "Completion call latency in seconds"
    )
    .unwrap();
    pub static ref RATE_GATE_SENDERS: Gauge =
        register_gauge!("relay_rate_gate_senders", "Current number of senders tracked by the rate gate").unwrap();
}
