mod filter;
mod origin;
mod queue;
mod runtime;
mod server;

pub use filter::*;
pub use origin::*;
pub use queue::*;
pub use runtime::*;
pub use server::*;
