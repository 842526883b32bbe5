use std::sync::Arc;
use crate::rate_limit::RateGate;
use crate::reply::ReplyGenerator;
// app's shared state

pub struct AppState {
    pub rate_gate: Arc<RateGate>,
    pub replies: ReplyGenerator,
}

impl AppState {
    pub fn new(rate_gate: Arc<RateGate>, replies: ReplyGenerator) -> Self {
        Self { rate_gate, replies }
    }
}
