use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Request-line prefixes that mark a payload as HTTP.
///
/// Matching is a literal, case-sensitive byte prefix test against the start
/// of the payload. A method missing from this set makes every packet that
/// carries it look like non-HTTP traffic, so rules targeting it never fire.
///
/// Most deployments list three or four methods, which fit inline without a
/// heap allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MethodSet(SmallVec<[String; 4]>);

impl MethodSet {
    pub fn new<I, S>(methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(methods.into_iter().map(Into::into).collect())
    }

    /// True when `payload` starts with one of the recognized methods.
    pub fn recognizes(&self, payload: &[u8]) -> bool {
        self.0.iter().any(|m| payload.starts_with(m.as_bytes()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for MethodSet {
    fn default() -> Self {
        Self::new(["GET", "POST", "PUT"])
    }
}
