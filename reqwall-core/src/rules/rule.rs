use crate::request::ParsedRequest;
use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// `type` value that turns a matching rule into a drop.
pub const DROP_TYPE: &str = "delete";

/// A single filtering directive.
///
/// Every predicate is optional: an empty string, or a non-positive
/// `content_len`, is a wildcard that always holds.
///
/// Rule file keys (`type`, `host`, `method`, `userAgent`, `pathPrefix`,
/// `contentLen`) are matched ignoring ASCII case. A `null` value leaves the
/// field at its default. Unknown keys are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    #[serde(rename = "type")]
    pub kind: String,
    pub host: String,
    pub method: String,
    pub user_agent: String,
    pub path_prefix: String,

    /// Inclusive upper bound on the declared content length.
    pub content_len: i64,
}

impl Rule {
    /// Whether this rule drops the request once selected.
    pub fn drops(&self) -> bool {
        self.kind == DROP_TYPE
    }

    /// True when every non-wildcard predicate holds for `req`.
    ///
    /// A request without a request line matches nothing.
    ///
    /// Predicates:
    /// - `method`: exact match
    /// - `path_prefix`: byte-wise, case-sensitive prefix of the path
    /// - `host`: exact match against the `Host` header
    /// - `user_agent`: substring of the `User-Agent` header
    /// - `content_len`: request content length must not exceed it
    pub fn matches(&self, req: &ParsedRequest) -> bool {
        let Some(line) = req.request_line.as_ref() else {
            return false;
        };

        if !self.method.is_empty() && self.method != line.method {
            return false;
        }

        if !self.path_prefix.is_empty() && !line.path.starts_with(&self.path_prefix) {
            return false;
        }

        if !self.host.is_empty() && self.host != req.host() {
            return false;
        }

        if !self.user_agent.is_empty() && !req.user_agent().contains(&self.user_agent) {
            return false;
        }

        if self.content_len > 0 && req.content_length > self.content_len {
            return false;
        }

        true
    }

    /// True when the rule carries no predicate at all.
    pub fn is_wildcard(&self) -> bool {
        self.host.is_empty()
            && self.method.is_empty()
            && self.user_agent.is_empty()
            && self.path_prefix.is_empty()
            && self.content_len <= 0
    }
}

impl<'de> Deserialize<'de> for Rule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RuleVisitor)
    }
}

struct RuleVisitor;

impl<'de> Visitor<'de> for RuleVisitor {
    type Value = Rule;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a rule object")
    }

    // `null` in place of an object
    fn visit_unit<E: de::Error>(self) -> Result<Rule, E> {
        Ok(Rule::default())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Rule, A::Error> {
        let mut rule = Rule::default();

        // Repeated keys: the last non-null value wins.
        while let Some(key) = map.next_key::<String>()? {
            match key.to_ascii_lowercase().as_str() {
                "type" => assign(&mut rule.kind, map.next_value()?),
                "host" => assign(&mut rule.host, map.next_value()?),
                "method" => assign(&mut rule.method, map.next_value()?),
                "useragent" => assign(&mut rule.user_agent, map.next_value()?),
                "pathprefix" => assign(&mut rule.path_prefix, map.next_value()?),
                "contentlen" => assign(&mut rule.content_len, map.next_value()?),
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        Ok(rule)
    }
}

fn assign<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}
