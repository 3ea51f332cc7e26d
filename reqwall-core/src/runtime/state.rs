use crate::conf::{RuntimeConfig, load_config, load_rules, load_rules_or_empty, validate_config};
use crate::filter::{FilterStats, PacketFilter};
use crate::runtime::ReloadError;
use arc_swap::ArcSwap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Immutable snapshot read by the packet path.
///
/// Swapped whole on reload; in-flight evaluations finish against the
/// snapshot they loaded.
#[derive(Debug)]
pub struct RuntimeState {
    pub filter: PacketFilter,
    pub rules_path: PathBuf,
}

/// Build the startup snapshot.
///
/// A rule file that cannot be loaded yields an empty rule set rather than an
/// error, so the session runs fail-open.
pub fn build_runtime_state(cfg: &RuntimeConfig) -> RuntimeState {
    let rules_path = cfg.rules_path();
    let rules = load_rules_or_empty(&rules_path);

    tracing::info!(
        rules = rules.len(),
        methods = ?cfg.filter.methods.iter().collect::<Vec<_>>(),
        path = %rules_path.display(),
        "rule set loaded"
    );

    RuntimeState {
        filter: PacketFilter::new(rules, cfg.filter.methods.clone()),
        rules_path,
    }
}

/// Re-read config and rules, then atomically replace the snapshot.
///
/// `config_path` of `None` means the session runs on built-in defaults, so
/// only the rule file is re-read.
///
/// Unlike startup, a reload that fails keeps the current snapshot in place:
/// a typo in the rule file must not silently disable an active policy.
pub fn reload_runtime_state(
    config_path: Option<&Path>,
    rules_override: Option<&Path>,
    state: &ArcSwap<RuntimeState>,
) -> Result<(), ReloadError> {
    // Parse and validate config.
    let mut cfg = match config_path {
        Some(path) => load_config(path)?,
        None => RuntimeConfig::default(),
    };
    if let Some(rules) = rules_override {
        cfg = cfg.with_rules_file(rules);
    }

    let rules_path = cfg.rules_path();
    let rules = load_rules(&rules_path)?;

    let report = validate_config(&cfg, &rules);
    if report.has_errors() {
        return Err(ReloadError::InvalidConfig { report });
    }

    // Build a new runtime state OFFLINE.
    let new_state = RuntimeState {
        filter: PacketFilter::new(rules, cfg.filter.methods.clone()),
        rules_path,
    };

    // Log comparison against current state.
    let old = state.load();
    tracing::info!(
        old_rules = old.filter.rules().len(),
        new_rules = new_state.filter.rules().len(),
        warnings = report.warnings.len(),
        "runtime state reloaded"
    );

    // Atomic swap (point of no return).
    state.store(Arc::new(new_state));

    Ok(())
}

impl RuntimeState {
    /// Evaluate one packet against this snapshot and count the outcome.
    pub fn evaluate(&self, packet: &[u8], stats: &FilterStats) -> crate::filter::Decision {
        let decision = self.filter.evaluate(packet);
        stats.record(&decision);
        decision
    }
}
