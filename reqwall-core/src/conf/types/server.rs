use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Optional pid file path, used by `reqwall reload`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid_file: Option<PathBuf>,

    /// Wall-clock length of a filtering session in seconds. `0` runs until
    /// interrupted.
    pub session_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            pid_file: None,
            session_secs: 120,
        }
    }
}
