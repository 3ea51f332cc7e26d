use crate::request::ParsedRequest;
use crate::rules::{Rule, Verdict};
use std::sync::Arc;

/// An ordered, immutable list of rules.
///
/// Position is the only priority: the first rule whose predicates all hold
/// is selected and later rules are never consulted. The list is never
/// reordered after construction, and clones share the same backing slice.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Arc<[Rule]>,
}

/// The rule selected for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMatch<'a> {
    /// Position of the rule in the set.
    pub index: usize,
    pub rule: &'a Rule,
}

impl RuleMatch<'_> {
    pub fn verdict(&self) -> Verdict {
        Verdict::from_drop(self.rule.drops())
    }
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self {
            rules: rules.into(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// First rule in order whose predicates all hold for `req`.
    pub fn select(&self, req: &ParsedRequest) -> Option<RuleMatch<'_>> {
        self.rules
            .iter()
            .enumerate()
            .find(|(_, rule)| rule.matches(req))
            .map(|(index, rule)| RuleMatch { index, rule })
    }

    /// `true` drops the request, `false` accepts it.
    ///
    /// No selected rule means accept.
    pub fn should_drop(&self, req: &ParsedRequest) -> bool {
        self.select(req).is_some_and(|m| m.rule.drops())
    }

    pub fn evaluate(&self, req: &ParsedRequest) -> Verdict {
        Verdict::from_drop(self.should_drop(req))
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl From<Vec<Rule>> for RuleSet {
    fn from(rules: Vec<Rule>) -> Self {
        Self::new(rules)
    }
}
