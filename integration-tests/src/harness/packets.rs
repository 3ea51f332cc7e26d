//! Frame builders for end-to-end tests.
//!
//! Frames start at the IPv4 header, the way NFQUEUE hands them over.

use etherparse::{PacketBuilder, TcpOptionElement};

const CLIENT: [u8; 4] = [10, 0, 0, 2];
const SERVER: [u8; 4] = [10, 0, 0, 1];

/// IPv4/TCP frame to port 80 carrying `payload`.
pub fn tcp(payload: &[u8]) -> Vec<u8> {
    let builder = PacketBuilder::ipv4(CLIENT, SERVER, 64)
        .tcp(40000, 80, 1, 64240)
        .psh()
        .ack(1);

    let mut frame = Vec::with_capacity(builder.size(payload.len()));
    builder
        .write(&mut frame, payload)
        .expect("failed to build tcp frame");
    frame
}

/// Same as [`tcp`] but with TCP options, so the data offset exceeds 5 words.
pub fn tcp_with_options(payload: &[u8]) -> Vec<u8> {
    let builder = PacketBuilder::ipv4(CLIENT, SERVER, 64)
        .tcp(40000, 80, 1, 64240)
        .options(&[
            TcpOptionElement::MaximumSegmentSize(1460),
            TcpOptionElement::Noop,
            TcpOptionElement::WindowScale(7),
            TcpOptionElement::Timestamp(1, 2),
        ])
        .expect("failed to set tcp options");

    let mut frame = Vec::with_capacity(builder.size(payload.len()));
    builder
        .write(&mut frame, payload)
        .expect("failed to build tcp frame");
    frame
}

/// IPv4/UDP frame carrying `payload`.
pub fn udp(payload: &[u8]) -> Vec<u8> {
    let builder = PacketBuilder::ipv4(CLIENT, SERVER, 64).udp(40000, 80);

    let mut frame = Vec::with_capacity(builder.size(payload.len()));
    builder
        .write(&mut frame, payload)
        .expect("failed to build udp frame");
    frame
}

/// IPv6/TCP frame carrying `payload`.
pub fn tcp_v6(payload: &[u8]) -> Vec<u8> {
    let mut src = [0u8; 16];
    let mut dst = [0u8; 16];
    src[15] = 2;
    dst[15] = 1;

    let builder = PacketBuilder::ipv6(src, dst, 64).tcp(40000, 80, 1, 64240);

    let mut frame = Vec::with_capacity(builder.size(payload.len()));
    builder
        .write(&mut frame, payload)
        .expect("failed to build ipv6 frame");
    frame
}

/// Raw HTTP/1.1 request head: request line, headers, blank line.
pub fn request(method: &str, path: &str, headers: &[(&str, &str)]) -> Vec<u8> {
    let mut out = format!("{method} {path} HTTP/1.1\r\n");
    for (name, value) in headers {
        out.push_str(&format!("{name}: {value}\r\n"));
    }
    out.push_str("\r\n");
    out.into_bytes()
}

/// [`request`] wrapped in an IPv4/TCP frame.
pub fn http(method: &str, path: &str, headers: &[(&str, &str)]) -> Vec<u8> {
    tcp(&request(method, path, headers))
}
