use crate::packet::MethodSet;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    /// Rule file, relative paths resolve against the config directory.
    pub rules_file: PathBuf,

    /// Method prefixes that mark a payload as HTTP.
    pub methods: MethodSet,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            rules_file: PathBuf::from("rules.json"),
            methods: MethodSet::default(),
        }
    }
}
