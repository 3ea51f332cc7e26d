mod decision;
mod packet_filter;
mod stats;

pub use decision::*;
pub use packet_filter::*;
pub use stats::*;
