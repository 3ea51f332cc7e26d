use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    // IO
    #[error("failed to read config file {}: {}", .path.display(), .source)]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read rule file {}: {}", .path.display(), .source)]
    ReadRules {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Parsing
    #[error("failed to parse HCL in {}: {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        #[source]
        source: hcl::Error,
    },

    #[error("failed to parse rules in {}: {}", .path.display(), .source)]
    ParseRules {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: hcl::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }

    pub fn read_rules(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadRules {
            path: path.into(),
            source,
        }
    }

    pub fn parse_rules(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::ParseRules {
            path: path.into(),
            source,
        }
    }
}
