use crate::request::{HeaderMap, ParsedRequest, RequestLine};

const LINE_SEPARATOR: &str = "\r\n";
const HEADER_SEPARATOR: &str = ": ";
const CONTENT_LENGTH: &str = "Content-Length";

/// Turns an HTTP payload into a [`ParsedRequest`].
///
/// Lenient by construction: missing or broken structure degrades to empty
/// fields and never fails.
///
/// - lines are split on CRLF; the first is the request line
/// - the request line is split on single spaces into method and path
/// - every following line is split on the first `": "`; lines without it
///   (the blank separator, body fragments) are dropped
/// - a repeated header name overwrites the earlier value
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD before splitting.
pub fn parse_request(payload: &[u8]) -> ParsedRequest {
    let text = String::from_utf8_lossy(payload);
    let mut lines = text.split(LINE_SEPARATOR);

    let request_line = lines.next().and_then(parse_request_line);
    let headers = parse_headers(lines);
    let content_length = headers
        .get(CONTENT_LENGTH)
        .map(|v| parse_content_length(v))
        .unwrap_or(0);

    ParsedRequest {
        request_line,
        headers,
        content_length,
    }
}

fn parse_request_line(line: &str) -> Option<RequestLine> {
    let mut tokens = line.split(' ');
    let method = tokens.next()?;
    let path = tokens.next()?;

    Some(RequestLine {
        method: method.to_owned(),
        path: path.to_owned(),
    })
}

fn parse_headers<'a>(lines: impl Iterator<Item = &'a str>) -> HeaderMap {
    let mut headers = HeaderMap::default();

    for line in lines {
        if let Some((name, value)) = line.split_once(HEADER_SEPARATOR) {
            headers.insert(name.to_owned(), value.to_owned());
        }
    }

    headers
}

/// Reads a leading base-10 integer the way `scanf("%d")` does.
///
/// Leading whitespace is skipped, one optional sign is honoured and digits
/// are consumed until the first non-digit. No digits, or a value that does
/// not fit in an `i64`, yields `0`.
pub fn parse_content_length(value: &str) -> i64 {
    let value = value.trim_start();

    let (negative, rest) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return 0;
    }

    let digits = &rest[..digits_len];
    let parsed = if negative {
        format!("-{digits}").parse::<i64>()
    } else {
        digits.parse::<i64>()
    };

    parsed.unwrap_or(0)
}
