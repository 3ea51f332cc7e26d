use crate::conf::types::QueueConfig;
use crate::rules::Verdict;
use crate::server::DispatchError;
use crate::server::dispatch::{PacketQueue, QueuedPacket};
use std::io;

/// Kernel packet queue bound through netfilter's NFQUEUE target.
#[cfg(target_os = "linux")]
pub struct NfQueue {
    queue: nfq::Queue,
}

#[cfg(target_os = "linux")]
impl NfQueue {
    /// Open the netlink socket and bind it to `cfg.num`.
    ///
    /// Copies whole packets (up to `max_packet_len`), caps the kernel-side
    /// queue at `max_queue_len` and switches the socket to non-blocking so the
    /// session loop can observe its deadline.
    pub fn open(cfg: &QueueConfig) -> Result<Self, DispatchError> {
        let num = cfg.num;
        let mut queue = nfq::Queue::open().map_err(|e| DispatchError::setup(num, "open netlink socket", e))?;

        queue
            .bind(num)
            .map_err(|e| DispatchError::setup(num, "bind queue", e))?;
        queue
            .set_copy_range(num, cfg.max_packet_len)
            .map_err(|e| DispatchError::setup(num, "set copy range", e))?;
        queue
            .set_queue_max_len(num, cfg.max_queue_len)
            .map_err(|e| DispatchError::setup(num, "set queue length", e))?;
        queue
            .set_fail_open(num, cfg.fail_open)
            .map_err(|e| DispatchError::setup(num, "set fail-open", e))?;
        queue.set_nonblocking(true);

        tracing::info!(
            queue = num,
            max_packet_len = cfg.max_packet_len,
            max_queue_len = cfg.max_queue_len,
            fail_open = cfg.fail_open,
            "packet queue bound"
        );

        Ok(Self { queue })
    }
}

#[cfg(target_os = "linux")]
impl QueuedPacket for nfq::Message {
    fn payload(&self) -> &[u8] {
        self.get_payload()
    }
}

#[cfg(target_os = "linux")]
impl PacketQueue for NfQueue {
    type Packet = nfq::Message;

    fn recv(&mut self) -> io::Result<Option<nfq::Message>> {
        match self.queue.recv() {
            Ok(msg) => Ok(Some(msg)),
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn verdict(&mut self, mut msg: nfq::Message, verdict: Verdict) -> io::Result<()> {
        msg.set_verdict(match verdict {
            Verdict::Accept => nfq::Verdict::Accept,
            Verdict::Drop => nfq::Verdict::Drop,
        });
        self.queue.verdict(msg)
    }
}

/// Placeholder on platforms without netfilter; opening always fails.
#[cfg(not(target_os = "linux"))]
pub struct NfQueue;

#[cfg(not(target_os = "linux"))]
impl NfQueue {
    pub fn open(_cfg: &QueueConfig) -> Result<Self, DispatchError> {
        Err(DispatchError::Unsupported)
    }
}

#[cfg(not(target_os = "linux"))]
pub struct NoPacket;

#[cfg(not(target_os = "linux"))]
impl QueuedPacket for NoPacket {
    fn payload(&self) -> &[u8] {
        &[]
    }
}

#[cfg(not(target_os = "linux"))]
impl PacketQueue for NfQueue {
    type Packet = NoPacket;

    fn recv(&mut self) -> io::Result<Option<NoPacket>> {
        Ok(None)
    }

    fn verdict(&mut self, _packet: NoPacket, _verdict: Verdict) -> io::Result<()> {
        Ok(())
    }
}
