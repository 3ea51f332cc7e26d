use crate::filter::{Decision, DecisionReason};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Per-session decision counters, shared across workers without locking.
#[derive(Debug, Default)]
pub struct FilterStats {
    packets: AtomicU64,
    accepted: AtomicU64,
    dropped: AtomicU64,
    not_http: AtomicU64,
    malformed: AtomicU64,
}

/// Point-in-time copy of [`FilterStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FilterStatsSnapshot {
    pub packets: u64,
    pub accepted: u64,
    pub dropped: u64,
    pub not_http: u64,
    pub malformed: u64,
}

impl FilterStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, decision: &Decision) {
        self.packets.fetch_add(1, Ordering::Relaxed);

        if decision.verdict.is_drop() {
            self.dropped.fetch_add(1, Ordering::Relaxed);
        } else {
            self.accepted.fetch_add(1, Ordering::Relaxed);
        }

        match decision.reason {
            DecisionReason::NotHttp => {
                self.not_http.fetch_add(1, Ordering::Relaxed);
            }
            DecisionReason::Malformed { .. } => {
                self.malformed.fetch_add(1, Ordering::Relaxed);
            }
            _ => {}
        }
    }

    pub fn snapshot(&self) -> FilterStatsSnapshot {
        FilterStatsSnapshot {
            packets: self.packets.load(Ordering::Relaxed),
            accepted: self.accepted.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            not_http: self.not_http.load(Ordering::Relaxed),
            malformed: self.malformed.load(Ordering::Relaxed),
        }
    }
}
