use serde::Serialize;
use thiserror::Error;

/// Why a diverted packet could not yield an HTTP payload.
///
/// Both variants resolve to an accept verdict. Neither is ever reported to
/// the dispatcher as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
pub enum ExtractError {
    #[error("payload is not an HTTP request")]
    NotHttp,

    #[error("malformed packet: {0}")]
    Malformed(MalformedReason),
}

/// The bound that failed while walking the IPv4 and TCP headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedReason {
    /// Fewer bytes than a minimal IPv4 header.
    TooShortForIpHeader,
    /// Version nibble is not 4.
    NotIpv4,
    /// IHL below five words.
    InvalidIpHeaderLength,
    /// Fewer bytes than the IHL announces.
    TruncatedIpHeader,
    /// Fewer bytes than a minimal TCP header after the IP header.
    TruncatedTcpHeader,
    /// TCP data offset below five words.
    InvalidTcpHeaderLength,
    /// Fewer bytes than the TCP data offset announces.
    TruncatedTcpOptions,
}

impl MalformedReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TooShortForIpHeader => "too_short_for_ip_header",
            Self::NotIpv4 => "not_ipv4",
            Self::InvalidIpHeaderLength => "invalid_ip_header_length",
            Self::TruncatedIpHeader => "truncated_ip_header",
            Self::TruncatedTcpHeader => "truncated_tcp_header",
            Self::InvalidTcpHeaderLength => "invalid_tcp_header_length",
            Self::TruncatedTcpOptions => "truncated_tcp_options",
        }
    }
}

impl std::fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
