mod error;
mod extract;
mod methods;
#[cfg(test)]
pub(crate) mod tests;

pub use error::*;
pub use extract::*;
pub use methods::*;
