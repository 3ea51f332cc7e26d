use crate::packet::{ExtractError, MalformedReason, MethodSet};

const MIN_IPV4_HEADER_LEN: usize = 20;
const MIN_TCP_HEADER_LEN: usize = 20;
const TCP_DATA_OFFSET_BYTE: usize = 12;
const IPV4_PROTOCOL_BYTE: usize = 9;
const IPPROTO_TCP: u8 = 6;

/// Locates the HTTP request carried by a raw IPv4/TCP packet.
///
/// Walks the headers using only their length fields:
/// 1. IHL (low nibble of byte 0) x 4 gives the IP header length
/// 2. TCP data offset (high nibble of byte 12 of the TCP header) x 4 gives
///    the TCP header length
/// 3. Everything after both headers is the application payload
///
/// IP options are skipped via the IHL and never parsed. Every offset is
/// checked against the buffer before it is read, so truncated or lying
/// headers yield `Malformed` instead of reading out of bounds.
///
/// The payload counts as HTTP only when it is non-empty and starts with one
/// of `methods` exactly as written.
pub fn extract_http_payload<'a>(
    packet: &'a [u8],
    methods: &MethodSet,
) -> Result<&'a [u8], ExtractError> {
    //-------------------------------------------------------------------------
    // IPv4 header
    //-------------------------------------------------------------------------
    if packet.len() < MIN_IPV4_HEADER_LEN {
        return Err(malformed(MalformedReason::TooShortForIpHeader));
    }

    if packet[0] >> 4 != 4 {
        return Err(malformed(MalformedReason::NotIpv4));
    }

    let ip_header_len = usize::from(packet[0] & 0x0F) * 4;
    if ip_header_len < MIN_IPV4_HEADER_LEN {
        return Err(malformed(MalformedReason::InvalidIpHeaderLength));
    }
    if packet.len() < ip_header_len {
        return Err(malformed(MalformedReason::TruncatedIpHeader));
    }

    if packet[IPV4_PROTOCOL_BYTE] != IPPROTO_TCP {
        return Err(ExtractError::NotHttp);
    }

    //-------------------------------------------------------------------------
    // TCP header
    //-------------------------------------------------------------------------
    let tcp = &packet[ip_header_len..];
    if tcp.len() < MIN_TCP_HEADER_LEN {
        return Err(malformed(MalformedReason::TruncatedTcpHeader));
    }

    let tcp_header_len = usize::from(tcp[TCP_DATA_OFFSET_BYTE] >> 4) * 4;
    if tcp_header_len < MIN_TCP_HEADER_LEN {
        return Err(malformed(MalformedReason::InvalidTcpHeaderLength));
    }
    if tcp.len() < tcp_header_len {
        return Err(malformed(MalformedReason::TruncatedTcpOptions));
    }

    //-------------------------------------------------------------------------
    // Application payload
    //-------------------------------------------------------------------------
    let payload = &tcp[tcp_header_len..];
    if payload.is_empty() || !methods.recognizes(payload) {
        return Err(ExtractError::NotHttp);
    }

    Ok(payload)
}

fn malformed(reason: MalformedReason) -> ExtractError {
    ExtractError::Malformed(reason)
}
