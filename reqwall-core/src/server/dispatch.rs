use crate::filter::FilterStats;
use crate::rules::Verdict;
use crate::runtime::RuntimeState;
use arc_swap::ArcSwap;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// A packet waiting for its verdict.
pub trait QueuedPacket {
    /// Raw IPv4 packet bytes, starting at the IP header.
    fn payload(&self) -> &[u8];
}

/// Source of diverted packets and sink for their verdicts.
///
/// The production implementation is the kernel's NFQUEUE; tests plug in an
/// in-memory queue.
pub trait PacketQueue {
    type Packet: QueuedPacket;

    /// Next packet, or `None` when nothing is waiting right now.
    fn recv(&mut self) -> io::Result<Option<Self::Packet>>;

    /// Hand the packet back to the kernel with its verdict.
    fn verdict(&mut self, packet: Self::Packet, verdict: Verdict) -> io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct SessionLimits {
    /// Stop taking packets once this instant passes. `None` runs until shutdown.
    pub deadline: Option<Instant>,
    /// Evaluations slower than this are reported.
    pub verdict_timeout: Duration,
    /// Sleep between polls when the queue is empty.
    pub idle_backoff: Duration,
}

impl SessionLimits {
    pub fn new(session: Option<Duration>, verdict_timeout: Duration, idle_backoff: Duration) -> Self {
        Self {
            deadline: session.map(|d| Instant::now() + d),
            verdict_timeout,
            idle_backoff,
        }
    }

    fn expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    DeadlineElapsed,
    Shutdown,
}

/// Pull packets, evaluate them against the current snapshot, return verdicts.
///
/// Receive and verdict errors are logged and skipped; only the deadline or
/// the shutdown flag ends the session. The snapshot is re-read for every
/// packet so a reload takes effect on the next one.
pub fn run_session<Q: PacketQueue>(
    queue: &mut Q,
    state: &ArcSwap<RuntimeState>,
    limits: &SessionLimits,
    shutdown: &AtomicBool,
    stats: &FilterStats,
) -> SessionEnd {
    let mut seq: u64 = 0;

    loop {
        if shutdown.load(Ordering::Relaxed) {
            return SessionEnd::Shutdown;
        }
        if limits.expired() {
            return SessionEnd::DeadlineElapsed;
        }

        let packet = match queue.recv() {
            Ok(Some(packet)) => packet,
            Ok(None) => {
                idle(limits);
                continue;
            }
            Err(e) => {
                tracing::warn!(error = %e, "packet queue receive error");
                idle(limits);
                continue;
            }
        };

        seq += 1;
        let started = Instant::now();
        let decision = state.load().evaluate(packet.payload(), stats);
        let elapsed = started.elapsed();

        if elapsed > limits.verdict_timeout {
            tracing::warn!(
                seq,
                elapsed_us = elapsed.as_micros() as u64,
                timeout_ms = limits.verdict_timeout.as_millis() as u64,
                "packet evaluation exceeded verdict timeout"
            );
        }

        tracing::debug!(
            seq,
            len = packet.payload().len(),
            verdict = %decision.verdict,
            reason = ?decision.reason,
            "packet evaluated"
        );

        if let Err(e) = queue.verdict(packet, decision.verdict) {
            tracing::warn!(seq, error = %e, "packet queue verdict error");
        }
    }
}

fn idle(limits: &SessionLimits) {
    if !limits.idle_backoff.is_zero() {
        thread::sleep(limits.idle_backoff);
    }
}
