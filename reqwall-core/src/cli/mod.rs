pub mod conf;
pub mod eval;
pub mod reload;
