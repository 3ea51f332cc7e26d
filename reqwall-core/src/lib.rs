pub mod cli;
pub mod conf;
pub mod filter;
pub mod logging;
pub mod packet;
pub mod request;
pub mod rules;
pub mod runtime;
pub mod server;
