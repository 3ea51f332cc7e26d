use serde::{Deserialize, Serialize};

/// NFQUEUE binding parameters.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueueConfig {
    /// Queue number the iptables/nftables rule diverts to.
    pub num: u16,

    /// Bytes of each packet copied to userspace. The full payload is needed,
    /// so this should cover the largest expected packet.
    pub max_packet_len: u16,

    /// Kernel-side queue depth.
    pub max_queue_len: u32,

    /// Evaluations slower than this are reported; the kernel applies its
    /// own policy to packets left without a verdict.
    pub verdict_timeout_ms: u64,

    /// Let the kernel accept packets when the queue overflows.
    pub fail_open: bool,

    /// Sleep between polls of an empty queue.
    pub idle_backoff_us: u64,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            num: 100,
            max_packet_len: 0xFFFF,
            max_queue_len: 0xFF,
            verdict_timeout_ms: 15,
            fail_open: true,
            idle_backoff_us: 200,
        }
    }
}
