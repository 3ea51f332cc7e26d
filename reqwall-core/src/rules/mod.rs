mod rule;
mod rule_set;
mod verdict;
#[cfg(test)]
mod tests;

pub use rule::*;
pub use rule_set::*;
pub use verdict::*;
