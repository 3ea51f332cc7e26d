mod dispatch;
mod error;
mod nfqueue;
mod pid;
mod reload;
pub mod setup;
#[cfg(test)]
mod tests;

pub use dispatch::{PacketQueue, QueuedPacket, SessionEnd, SessionLimits, run_session};
pub use error::DispatchError;
pub use nfqueue::NfQueue;
pub use reload::{ReloadEvent, ReloadHandle};
pub use setup::run;
