//-----------------------------------------------------------------------------
// Test helpers
//-----------------------------------------------------------------------------
/// Builder for raw IPv4/TCP frames with controllable header lengths.
pub(crate) struct RawPacket {
    version: u8,
    ip_option_words: u8,
    tcp_option_words: u8,
    protocol: u8,
    payload: Vec<u8>,
}

impl RawPacket {
    pub(crate) fn new(payload: impl AsRef<[u8]>) -> Self {
        Self {
            version: 4,
            ip_option_words: 0,
            tcp_option_words: 0,
            protocol: 6,
            payload: payload.as_ref().to_vec(),
        }
    }

    pub(crate) fn with_version(mut self, version: u8) -> Self {
        self.version = version;
        self
    }

    pub(crate) fn with_ip_options(mut self, words: u8) -> Self {
        self.ip_option_words = words;
        self
    }

    pub(crate) fn with_tcp_options(mut self, words: u8) -> Self {
        self.tcp_option_words = words;
        self
    }

    pub(crate) fn with_protocol(mut self, protocol: u8) -> Self {
        self.protocol = protocol;
        self
    }

    pub(crate) fn build(self) -> Vec<u8> {
        let ip_len = 20 + usize::from(self.ip_option_words) * 4;
        let tcp_len = 20 + usize::from(self.tcp_option_words) * 4;
        let total = ip_len + tcp_len + self.payload.len();

        let mut out = vec![0u8; ip_len + tcp_len];

        // IPv4 header
        out[0] = (self.version << 4) | (5 + self.ip_option_words);
        out[2..4].copy_from_slice(&(total as u16).to_be_bytes());
        out[8] = 64;
        out[9] = self.protocol;
        out[12..16].copy_from_slice(&[10, 0, 0, 1]);
        out[16..20].copy_from_slice(&[10, 0, 0, 2]);

        // TCP header
        let tcp = &mut out[ip_len..];
        tcp[0..2].copy_from_slice(&40000u16.to_be_bytes());
        tcp[2..4].copy_from_slice(&80u16.to_be_bytes());
        tcp[12] = (5 + self.tcp_option_words) << 4;
        tcp[13] = 0x18; // PSH|ACK

        out.extend_from_slice(&self.payload);
        out
    }
}

/// Minimal frame carrying `payload` with no IP or TCP options.
pub(crate) fn http_packet(payload: &str) -> Vec<u8> {
    RawPacket::new(payload).build()
}
