use crate::filter::{FilterStats, PacketFilter};
use crate::packet::MethodSet;
use crate::packet::tests::test_helpers::http_packet;
use crate::rules::{Rule, RuleSet, Verdict};
use crate::runtime::RuntimeState;
use crate::server::{PacketQueue, QueuedPacket, SessionEnd, SessionLimits, run_session};
use arc_swap::ArcSwap;
use pretty_assertions::assert_eq;
use std::collections::VecDeque;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

//-----------------------------------------------------------------------------
// Test helpers
//-----------------------------------------------------------------------------
struct MemoryPacket(Vec<u8>);

impl QueuedPacket for MemoryPacket {
    fn payload(&self) -> &[u8] {
        &self.0
    }
}

enum Step {
    Packet(Vec<u8>),
    RecvError,
}

/// Replays a fixed script, then raises the shutdown flag once drained.
struct MemoryQueue {
    steps: VecDeque<Step>,
    verdicts: Vec<Verdict>,
    fail_verdicts: bool,
    shutdown: Arc<AtomicBool>,
    after_verdict: Option<Box<dyn FnMut(usize)>>,
}

impl MemoryQueue {
    fn new(steps: Vec<Step>, shutdown: Arc<AtomicBool>) -> Self {
        Self {
            steps: steps.into(),
            verdicts: Vec::new(),
            fail_verdicts: false,
            shutdown,
            after_verdict: None,
        }
    }
}

impl PacketQueue for MemoryQueue {
    type Packet = MemoryPacket;

    fn recv(&mut self) -> io::Result<Option<MemoryPacket>> {
        match self.steps.pop_front() {
            Some(Step::Packet(bytes)) => Ok(Some(MemoryPacket(bytes))),
            Some(Step::RecvError) => Err(io::Error::other("recv failed")),
            None => {
                self.shutdown.store(true, Ordering::Relaxed);
                Ok(None)
            }
        }
    }

    fn verdict(&mut self, _packet: MemoryPacket, verdict: Verdict) -> io::Result<()> {
        self.verdicts.push(verdict);
        if let Some(hook) = self.after_verdict.as_mut() {
            hook(self.verdicts.len());
        }
        if self.fail_verdicts {
            return Err(io::Error::other("verdict failed"));
        }
        Ok(())
    }
}

fn state_with(rules: Vec<Rule>) -> RuntimeState {
    RuntimeState {
        filter: PacketFilter::new(RuleSet::new(rules), MethodSet::default()),
        rules_path: PathBuf::from("rules.json"),
    }
}

fn drop_admin() -> Rule {
    Rule {
        kind: "delete".into(),
        path_prefix: "/admin".into(),
        ..Rule::default()
    }
}

fn limits() -> SessionLimits {
    SessionLimits::new(None, Duration::from_millis(15), Duration::ZERO)
}

//-----------------------------------------------------------------------------
// Tests
//-----------------------------------------------------------------------------
#[test]
fn every_packet_gets_exactly_one_verdict() {
    // Arrange
    let shutdown = Arc::new(AtomicBool::new(false));
    let mut queue = MemoryQueue::new(
        vec![
            Step::Packet(http_packet("GET /admin/x HTTP/1.1\r\n\r\n")),
            Step::Packet(http_packet("GET /public HTTP/1.1\r\n\r\n")),
            Step::Packet(vec![0x45, 0x00]),
        ],
        shutdown.clone(),
    );
    let state = ArcSwap::from_pointee(state_with(vec![drop_admin()]));
    let stats = FilterStats::new();

    // Act
    let end = run_session(&mut queue, &state, &limits(), &shutdown, &stats);

    // Assert
    assert_eq!(end, SessionEnd::Shutdown);
    assert_eq!(queue.verdicts, vec![Verdict::Drop, Verdict::Accept, Verdict::Accept]);

    let s = stats.snapshot();
    assert_eq!(s.packets, 3);
    assert_eq!(s.dropped, 1);
    assert_eq!(s.malformed, 1);
}

#[test]
fn receive_errors_do_not_end_the_session() {
    let shutdown = Arc::new(AtomicBool::new(false));
    let mut queue = MemoryQueue::new(
        vec![
            Step::RecvError,
            Step::Packet(http_packet("GET /admin HTTP/1.1\r\n\r\n")),
            Step::RecvError,
            Step::Packet(http_packet("GET / HTTP/1.1\r\n\r\n")),
        ],
        shutdown.clone(),
    );
    let state = ArcSwap::from_pointee(state_with(vec![drop_admin()]));

    let end = run_session(&mut queue, &state, &limits(), &shutdown, &FilterStats::new());

    assert_eq!(end, SessionEnd::Shutdown);
    assert_eq!(queue.verdicts, vec![Verdict::Drop, Verdict::Accept]);
}

#[test]
fn verdict_errors_do_not_end_the_session() {
    let shutdown = Arc::new(AtomicBool::new(false));
    let mut queue = MemoryQueue::new(
        vec![
            Step::Packet(http_packet("GET / HTTP/1.1\r\n\r\n")),
            Step::Packet(http_packet("GET / HTTP/1.1\r\n\r\n")),
        ],
        shutdown.clone(),
    );
    queue.fail_verdicts = true;
    let state = ArcSwap::from_pointee(state_with(vec![]));

    let end = run_session(&mut queue, &state, &limits(), &shutdown, &FilterStats::new());

    assert_eq!(end, SessionEnd::Shutdown);
    assert_eq!(queue.verdicts.len(), 2);
}

#[test]
fn elapsed_deadline_ends_the_session_before_receiving() {
    let shutdown = Arc::new(AtomicBool::new(false));
    let mut queue = MemoryQueue::new(
        vec![Step::Packet(http_packet("GET / HTTP/1.1\r\n\r\n"))],
        shutdown.clone(),
    );
    let state = ArcSwap::from_pointee(state_with(vec![]));
    let limits = SessionLimits::new(Some(Duration::ZERO), Duration::from_millis(15), Duration::ZERO);

    let end = run_session(&mut queue, &state, &limits, &shutdown, &FilterStats::new());

    assert_eq!(end, SessionEnd::DeadlineElapsed);
    assert!(queue.verdicts.is_empty());
}

#[test]
fn idle_session_runs_until_deadline() {
    // Arrange: a queue that never has anything and never signals shutdown
    struct EmptyQueue;
    impl PacketQueue for EmptyQueue {
        type Packet = MemoryPacket;
        fn recv(&mut self) -> io::Result<Option<MemoryPacket>> {
            Ok(None)
        }
        fn verdict(&mut self, _: MemoryPacket, _: Verdict) -> io::Result<()> {
            unreachable!("no packets were received")
        }
    }
    let shutdown = AtomicBool::new(false);
    let state = ArcSwap::from_pointee(state_with(vec![]));
    let limits = SessionLimits::new(
        Some(Duration::from_millis(20)),
        Duration::from_millis(15),
        Duration::from_millis(1),
    );

    // Act
    let end = run_session(&mut EmptyQueue, &state, &limits, &shutdown, &FilterStats::new());

    // Assert
    assert_eq!(end, SessionEnd::DeadlineElapsed);
}

#[test]
fn swapped_snapshot_applies_to_the_next_packet() {
    // Arrange
    let shutdown = Arc::new(AtomicBool::new(false));
    let state = Arc::new(ArcSwap::from_pointee(state_with(vec![])));
    let mut queue = MemoryQueue::new(
        vec![
            Step::Packet(http_packet("GET /admin HTTP/1.1\r\n\r\n")),
            Step::Packet(http_packet("GET /admin HTTP/1.1\r\n\r\n")),
        ],
        shutdown.clone(),
    );
    queue.after_verdict = Some(Box::new({
        let state = state.clone();
        move |n| {
            if n == 1 {
                state.store(Arc::new(state_with(vec![drop_admin()])));
            }
        }
    }));

    // Act
    run_session(&mut queue, &state, &limits(), &shutdown, &FilterStats::new());

    // Assert
    assert_eq!(queue.verdicts, vec![Verdict::Accept, Verdict::Drop]);
}
