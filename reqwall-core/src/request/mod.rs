mod parsed_request;
mod parser;

pub use parsed_request::*;
pub use parser::*;
