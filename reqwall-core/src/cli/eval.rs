use crate::conf::load_config;
use crate::filter::{Decision, FilterStats};
use crate::packet::extract_http_payload;
use crate::request::{ParsedRequest, parse_request};
use crate::runtime::build_runtime_state;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

#[derive(Serialize)]
struct EvalOutput {
    #[serde(flatten)]
    decision: Decision,
    /// Present only when the packet carried an HTTP payload.
    request: Option<ParsedRequest>,
}

/// Evaluate a single raw IPv4 packet dump offline and print the decision.
///
/// Uses the same snapshot construction as `run`, so a missing rule file
/// evaluates against an empty rule set.
pub fn run(config: &Path, packet_file: &Path) -> Result<()> {
    let cfg = load_config(config)?;
    let state = build_runtime_state(&cfg);

    let packet = fs::read(packet_file)
        .with_context(|| format!("failed to read packet file {}", packet_file.display()))?;

    let decision = state.evaluate(&packet, &FilterStats::new());
    let request = extract_http_payload(&packet, state.filter.methods())
        .ok()
        .map(parse_request);

    let out = EvalOutput { decision, request };
    println!("{}", serde_json::to_string_pretty(&out)?);

    Ok(())
}
