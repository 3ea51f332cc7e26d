use ahash::AHashMap;
use serde::Serialize;

/// Header mapping keyed by the exact header name as it appeared on the wire.
///
/// Keys are case-sensitive. When a name repeats, the last occurrence wins.
pub type HeaderMap = AHashMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestLine {
    pub method: String,
    pub path: String,
}

/// A request reconstructed from one packet's payload.
///
/// Derived from a single packet with no stream state, so a request split
/// across segments only shows what its first segment carried.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedRequest {
    /// `None` when the first line had fewer than two space separated tokens.
    pub request_line: Option<RequestLine>,
    pub headers: HeaderMap,
    /// Declared `Content-Length`, `0` when absent or unparsable.
    pub content_length: i64,
}

impl ParsedRequest {
    pub fn method(&self) -> Option<&str> {
        self.request_line.as_ref().map(|l| l.method.as_str())
    }

    pub fn path(&self) -> Option<&str> {
        self.request_line.as_ref().map(|l| l.path.as_str())
    }

    /// Header value by exact name, empty when absent.
    pub fn header(&self, name: &str) -> &str {
        self.headers.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn host(&self) -> &str {
        self.header("Host")
    }

    pub fn user_agent(&self) -> &str {
        self.header("User-Agent")
    }
}
