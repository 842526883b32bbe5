use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::{self, interval};

use crate::metrics::RATE_GATE_SENDERS;

// Sender used when the webhook omits `From` or sends it empty
pub const UNKNOWN_SENDER: &str = "unknown";

// Default spacing between two admitted requests from one sender
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Admitted,
    Rejected,
}

impl Admission {
    pub fn is_admitted(self) -> bool {
        self == Admission::Admitted
    }
}

/// Per-sender cooldown gate.
///
/// Holds the instant of the last *admitted* request for every sender seen.
/// Rejections never touch the stored instant, so the cooldown is measured
/// from one admission to the next.
pub struct RateGate {
    last_admitted: DashMap<String, Instant>,
    cooldown: Duration,
}

impl RateGate {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            last_admitted: DashMap::new(),
            cooldown,
        }
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    // Admit or reject `sender` at `now`.
    //
    // The entry guard holds the shard write lock for the whole read-then-write,
    // so two concurrent calls for the same sender can't both see a stale instant.
    pub fn admit(&self, sender: &str, now: Instant) -> Admission {
        let key = if sender.is_empty() { UNKNOWN_SENDER } else { sender };

        match self.last_admitted.entry(key.to_string()) {
            Entry::Occupied(mut entry) => {
                // duration_since saturates to zero if `now` is before the stored instant
                if now.duration_since(*entry.get()) >= self.cooldown {
                    entry.insert(now);
                    Admission::Admitted
                } else {
                    Admission::Rejected
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(now);
                Admission::Admitted
            }
        }
    }

    // Same as admit, against the real clock
    pub fn check(&self, sender: &str) -> Admission {
        self.admit(sender, Instant::now())
    }

    /// Drop every sender whose last admission is at least `max_age` before `now`.
    ///
    /// With `max_age >= cooldown` this can't change any future decision: an
    /// evicted sender would have been admitted anyway.
    pub fn evict_stale(&self, now: Instant, max_age: Duration) -> usize {
        let before = self.last_admitted.len();
        self.last_admitted
            .retain(|_, last| now.duration_since(*last) < max_age);
        before.saturating_sub(self.last_admitted.len())
    }

    pub fn len(&self) -> usize {
        self.last_admitted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_admitted.is_empty()
    }
}

impl Default for RateGate {
    fn default() -> Self {
        Self::new(DEFAULT_COOLDOWN)
    }
}

// Periodically evicts senders that can no longer be rejected
pub async fn sweeper(gate: Arc<RateGate>, sweep_interval: Duration) {
    let mut interval = interval(sweep_interval);

    tracing::info!(interval = ?sweep_interval, "rate gate sweeper started");

    loop {
        interval.tick().await;

        // tokio's clock so the sweep follows a paused runtime in tests
        let removed = gate.evict_stale(time::Instant::now().into_std(), gate.cooldown());
        RATE_GATE_SENDERS.set(gate.len() as f64);

        if removed > 0 {
            tracing::debug!(removed, remaining = gate.len(), "evicted stale senders");
        }
    }
}
