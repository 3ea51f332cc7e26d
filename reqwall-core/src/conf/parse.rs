use crate::conf::ConfigError;
use crate::conf::types::RuntimeConfig;
use crate::rules::Rule;
use std::fs;
use std::path::Path;

pub fn parse_config(path: &Path) -> Result<RuntimeConfig, ConfigError> {
    let s = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    let mut parsed: RuntimeConfig = hcl::from_str(&s).map_err(|e| ConfigError::parse(path, e))?;

    parsed.source = path.to_path_buf();

    Ok(parsed)
}

/// Reads a rule file: a JSON array of rule objects, in priority order.
pub fn parse_rules(path: &Path) -> Result<Vec<Rule>, ConfigError> {
    let s = fs::read_to_string(path).map_err(|e| ConfigError::read_rules(path, e))?;
    serde_json::from_str(&s).map_err(|e| ConfigError::parse_rules(path, e))
}
