use crate::conf::types::{FilterConfig, QueueConfig, ServerConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Fully resolved configuration, as loaded from `reqwall.hcl`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    /// File the configuration was read from.
    #[serde(skip)]
    pub source: PathBuf,

    pub server: ServerConfig,
    pub queue: QueueConfig,
    pub filter: FilterConfig,
}

impl RuntimeConfig {
    /// Rule file path with relative paths anchored at the config directory.
    pub fn rules_path(&self) -> PathBuf {
        let rules = &self.filter.rules_file;
        if rules.is_absolute() {
            return rules.clone();
        }

        self.source
            .parent()
            .map(|dir| dir.join(rules))
            .unwrap_or_else(|| rules.clone())
    }

    /// Replace the rule file, e.g. from a command-line override.
    pub fn with_rules_file(mut self, rules_file: impl AsRef<Path>) -> Self {
        self.filter.rules_file = rules_file.as_ref().to_path_buf();
        self
    }
}
