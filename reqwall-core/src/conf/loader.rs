use crate::conf::ConfigError;
use crate::conf::parse::{parse_config, parse_rules};
use crate::conf::types::RuntimeConfig;
use crate::rules::RuleSet;
use std::path::{Path, PathBuf};

/// Entry file looked up when a directory is given.
pub const CONFIG_FILE_NAME: &str = "reqwall.hcl";

/// Load `reqwall.hcl` from `root`, which may be the file itself or the
/// directory holding it.
pub fn load_config(root: &Path) -> Result<RuntimeConfig, ConfigError> {
    //--------------------------------------------------------------------------
    // Hard fail: IO and parsing
    //--------------------------------------------------------------------------
    parse_config(&resolve_config_file(root))
}

pub fn resolve_config_file(root: &Path) -> PathBuf {
    if root.is_dir() {
        root.join(CONFIG_FILE_NAME)
    } else {
        root.to_path_buf()
    }
}

/// Load the rule file into an immutable [`RuleSet`].
pub fn load_rules(path: &Path) -> Result<RuleSet, ConfigError> {
    let rules = parse_rules(path)?;
    tracing::debug!(path = %path.display(), rules = rules.len(), "rules loaded");
    Ok(RuleSet::new(rules))
}

/// Load the rule file, falling back to an empty set on any failure.
///
/// An empty set accepts every packet, so a missing or broken rule file
/// leaves traffic flowing for the whole session. The failure is logged once.
pub fn load_rules_or_empty(path: &Path) -> RuleSet {
    match load_rules(path) {
        Ok(rules) => rules,
        Err(e) => {
            tracing::error!(
                error = %e,
                path = %path.display(),
                "rule load failed; continuing with an empty rule set"
            );
            RuleSet::empty()
        }
    }
}
