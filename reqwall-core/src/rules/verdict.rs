use serde::Serialize;
use std::fmt;

/// What the kernel should do with a diverted packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Accept,
    Drop,
}

impl Verdict {
    pub fn from_drop(drop: bool) -> Self {
        if drop { Self::Drop } else { Self::Accept }
    }

    pub fn is_drop(&self) -> bool {
        matches!(self, Self::Drop)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accept => write!(f, "accept"),
            Self::Drop => write!(f, "drop"),
        }
    }
}
