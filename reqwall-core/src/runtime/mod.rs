mod error;
mod state;

pub use error::ReloadError;
pub use state::{RuntimeState, build_runtime_state, reload_runtime_state};
