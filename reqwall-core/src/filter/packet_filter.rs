use crate::filter::{Decision, DecisionReason};
use crate::packet::{MethodSet, extract_http_payload};
use crate::request::{ParsedRequest, parse_request};
use crate::rules::RuleSet;

/// Raw packet in, verdict out.
///
/// Pipeline:
/// 1. Extract the HTTP payload from the IPv4/TCP frame
/// 2. Parse it into a [`ParsedRequest`]
/// 3. Select the first matching rule
///
/// Any failure along the way accepts the packet. Holds no mutable state,
/// so one instance can serve any number of worker threads.
#[derive(Debug, Clone, Default)]
pub struct PacketFilter {
    rules: RuleSet,
    methods: MethodSet,
}

impl PacketFilter {
    pub fn new(rules: RuleSet, methods: MethodSet) -> Self {
        Self { rules, methods }
    }

    pub fn evaluate(&self, packet: &[u8]) -> Decision {
        let payload = match extract_http_payload(packet, &self.methods) {
            Ok(payload) => payload,
            Err(err) => return Decision::accept(err.into()),
        };

        self.evaluate_request(&parse_request(payload))
    }

    pub fn evaluate_request(&self, req: &ParsedRequest) -> Decision {
        if req.request_line.is_none() {
            return Decision::accept(DecisionReason::NoRequestLine);
        }

        match self.rules.select(req) {
            Some(m) => Decision::matched(m.index, m.verdict()),
            None => Decision::accept(DecisionReason::NoMatch),
        }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn methods(&self) -> &MethodSet {
        &self.methods
    }
}
