use crate::packet::{ExtractError, MalformedReason};
use crate::rules::Verdict;
use serde::Serialize;

/// Outcome of evaluating one packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub verdict: Verdict,
    pub reason: DecisionReason,
}

/// Why a packet got its verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecisionReason {
    /// Payload empty or not led by a recognized method.
    NotHttp,
    /// Header lengths pointed past the end of the packet.
    Malformed { cause: MalformedReason },
    /// Request line lacked a method or a path.
    NoRequestLine,
    /// No rule's predicates all held.
    NoMatch,
    /// The rule at `rule_index` was selected.
    Matched { rule_index: usize },
}

impl Decision {
    pub(crate) fn accept(reason: DecisionReason) -> Self {
        Self {
            verdict: Verdict::Accept,
            reason,
        }
    }

    pub(crate) fn matched(rule_index: usize, verdict: Verdict) -> Self {
        Self {
            verdict,
            reason: DecisionReason::Matched { rule_index },
        }
    }
}

impl From<ExtractError> for DecisionReason {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::NotHttp => Self::NotHttp,
            ExtractError::Malformed(cause) => Self::Malformed { cause },
        }
    }
}
