mod error;
mod loader;
mod parse;
pub mod types;
pub mod validation;

pub use error::ConfigError;
pub use loader::{CONFIG_FILE_NAME, load_config, load_rules, load_rules_or_empty, resolve_config_file};
pub use types::RuntimeConfig;
pub use validation::{ValidationReport, validate_config};
