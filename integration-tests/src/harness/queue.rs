use reqwall_core::rules::Verdict;
use reqwall_core::server::{PacketQueue, QueuedPacket};
use std::collections::VecDeque;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub struct MemoryPacket(Vec<u8>);

impl QueuedPacket for MemoryPacket {
    fn payload(&self) -> &[u8] {
        &self.0
    }
}

/// In-memory stand-in for the kernel queue.
///
/// Hands out the given frames in order and records each verdict. Once
/// drained it raises the shutdown flag so the session returns.
pub struct MemoryQueue {
    pending: VecDeque<Vec<u8>>,
    verdicts: Vec<Verdict>,
    shutdown: Arc<AtomicBool>,
}

impl MemoryQueue {
    pub fn new(frames: Vec<Vec<u8>>, shutdown: Arc<AtomicBool>) -> Self {
        Self {
            pending: frames.into(),
            verdicts: Vec::new(),
            shutdown,
        }
    }

    pub fn verdicts(&self) -> &[Verdict] {
        &self.verdicts
    }
}

impl PacketQueue for MemoryQueue {
    type Packet = MemoryPacket;

    fn recv(&mut self) -> io::Result<Option<MemoryPacket>> {
        match self.pending.pop_front() {
            Some(frame) => Ok(Some(MemoryPacket(frame))),
            None => {
                self.shutdown.store(true, Ordering::Relaxed);
                Ok(None)
            }
        }
    }

    fn verdict(&mut self, _packet: MemoryPacket, verdict: Verdict) -> io::Result<()> {
        self.verdicts.push(verdict);
        Ok(())
    }
}
