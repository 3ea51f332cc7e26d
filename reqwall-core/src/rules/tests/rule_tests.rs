use crate::request::parse_request;
use crate::rules::Rule;
use pretty_assertions::assert_eq;

fn rule() -> Rule {
    Rule::default()
}

#[test]
fn wildcard_rule_matches_any_request() {
    let rule = rule();

    assert!(rule.is_wildcard());
    assert!(rule.matches(&parse_request(b"GET / HTTP/1.1\r\n")));
    assert!(rule.matches(&parse_request(
        b"POST /x HTTP/1.1\r\nHost: a\r\nContent-Length: 99999\r\n"
    )));
}

#[test]
fn nothing_matches_request_without_request_line() {
    let req = parse_request(b"GET\r\nHost: a\r\n");

    assert!(!rule().matches(&req));
}

#[test]
fn method_must_match_exactly() {
    let rule = Rule {
        method: "POST".into(),
        ..rule()
    };

    assert!(rule.matches(&parse_request(b"POST / HTTP/1.1\r\n")));
    assert!(!rule.matches(&parse_request(b"POSTX / HTTP/1.1\r\n")));
    assert!(!rule.matches(&parse_request(b"post / HTTP/1.1\r\n")));
}

#[test]
fn path_prefix_is_case_sensitive_prefix() {
    let rule = Rule {
        path_prefix: "/admin".into(),
        ..rule()
    };

    assert!(rule.matches(&parse_request(b"GET /admin HTTP/1.1\r\n")));
    assert!(rule.matches(&parse_request(b"GET /administrator HTTP/1.1\r\n")));
    assert!(!rule.matches(&parse_request(b"GET /Admin HTTP/1.1\r\n")));
    assert!(!rule.matches(&parse_request(b"GET /x/admin HTTP/1.1\r\n")));
}

#[test]
fn host_must_equal_host_header() {
    let rule = Rule {
        host: "example.com".into(),
        ..rule()
    };

    assert!(rule.matches(&parse_request(b"GET / HTTP/1.1\r\nHost: example.com\r\n")));
    assert!(!rule.matches(&parse_request(
        b"GET / HTTP/1.1\r\nHost: example.com:8080\r\n"
    )));
    assert!(!rule.matches(&parse_request(b"GET / HTTP/1.1\r\n")));
}

#[test]
fn user_agent_is_substring_match() {
    let rule = Rule {
        user_agent: "curl".into(),
        ..rule()
    };

    assert!(rule.matches(&parse_request(b"GET / HTTP/1.1\r\nUser-Agent: curl/8.0\r\n")));
    assert!(rule.matches(&parse_request(
        b"GET / HTTP/1.1\r\nUser-Agent: libcurl-agent\r\n"
    )));
    assert!(!rule.matches(&parse_request(b"GET / HTTP/1.1\r\nUser-Agent: Curl\r\n")));
}

#[test]
fn content_len_is_inclusive_upper_bound() {
    let rule = Rule {
        content_len: 100,
        ..rule()
    };

    for (len, expected) in [(0, true), (99, true), (100, true), (101, false), (500, false)] {
        let payload = format!("POST / HTTP/1.1\r\nContent-Length: {len}\r\n\r\n");
        assert_eq!(
            rule.matches(&parse_request(payload.as_bytes())),
            expected,
            "content length {len}"
        );
    }
}

#[test]
fn non_positive_content_len_is_wildcard() {
    let rule = Rule {
        content_len: -1,
        ..rule()
    };

    assert!(rule.is_wildcard());
    assert!(rule.matches(&parse_request(
        b"POST / HTTP/1.1\r\nContent-Length: 1000000\r\n"
    )));
}

#[test]
fn only_delete_type_drops() {
    let drop = Rule {
        kind: "delete".into(),
        ..rule()
    };
    let other = Rule {
        kind: "Delete".into(),
        ..rule()
    };

    assert!(drop.drops());
    assert!(!other.drops());
    assert!(!rule().drops());
}

#[test]
fn deserializes_camel_case_and_capitalized_fields() {
    // Arrange
    let json = r#"[
        {"type": "delete", "method": "POST", "pathPrefix": "/admin", "userAgent": "curl", "contentLen": 10},
        {"Type": "delete", "Host": "h", "PathPrefix": "/p", "UserAgent": "ua", "ContentLen": 5},
        {}
    ]"#;

    // Act
    let rules: Vec<Rule> = serde_json::from_str(json).unwrap();

    // Assert
    assert_eq!(
        rules[0],
        Rule {
            kind: "delete".into(),
            method: "POST".into(),
            path_prefix: "/admin".into(),
            user_agent: "curl".into(),
            content_len: 10,
            ..rule()
        }
    );
    assert_eq!(
        rules[1],
        Rule {
            kind: "delete".into(),
            host: "h".into(),
            path_prefix: "/p".into(),
            user_agent: "ua".into(),
            content_len: 5,
            ..rule()
        }
    );
    assert_eq!(rules[2], rule());
}

#[test]
fn field_names_match_regardless_of_case() {
    // Arrange
    let json = r#"[{"TYPE": "delete", "useragent": "curl", "PATHPREFIX": "/a", "contentlen": 7, "hOsT": "h"}]"#;

    // Act
    let rules: Vec<Rule> = serde_json::from_str(json).unwrap();

    // Assert
    assert_eq!(
        rules[0],
        Rule {
            kind: "delete".into(),
            host: "h".into(),
            user_agent: "curl".into(),
            path_prefix: "/a".into(),
            content_len: 7,
            ..rule()
        }
    );
}

#[test]
fn lowercase_user_agent_key_does_not_widen_rule() {
    let rules: Vec<Rule> = serde_json::from_str(r#"[{"type": "delete", "useragent": "curl"}]"#).unwrap();

    let firefox = parse_request(b"GET / HTTP/1.1\r\nUser-Agent: firefox\r\n");
    let curl = parse_request(b"GET / HTTP/1.1\r\nUser-Agent: curl/8.0\r\n");

    assert!(!rules[0].is_wildcard());
    assert!(!rules[0].matches(&firefox));
    assert!(rules[0].matches(&curl));
}

#[test]
fn null_fields_keep_their_defaults() {
    // Arrange
    let json = r#"[
        {"type": "delete", "method": "POST", "host": null, "contentLen": null},
        null
    ]"#;

    // Act
    let rules: Vec<Rule> = serde_json::from_str(json).unwrap();

    // Assert
    assert_eq!(
        rules[0],
        Rule {
            kind: "delete".into(),
            method: "POST".into(),
            ..rule()
        }
    );
    assert_eq!(rules[1], rule());
}

#[test]
fn unknown_keys_are_ignored() {
    let rules: Vec<Rule> =
        serde_json::from_str(r#"[{"type": "delete", "comment": {"why": ["x"]}, "method": "PUT"}]"#).unwrap();

    assert_eq!(
        rules[0],
        Rule {
            kind: "delete".into(),
            method: "PUT".into(),
            ..rule()
        }
    );
}
