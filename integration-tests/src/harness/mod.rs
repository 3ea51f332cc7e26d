mod filter;
pub mod packets;
pub mod queue;
pub mod tracing;

pub use filter::TestFilter;
pub use queue::MemoryQueue;
pub use tracing::{CapturedEvent, init_test_tracing};
