use crate::conf::{ConfigError, ValidationReport};

#[derive(Debug, thiserror::Error)]
pub enum ReloadError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] ConfigError),

    #[error("configuration validation failed ({} errors)", .report.errors.len())]
    InvalidConfig { report: ValidationReport },
}
