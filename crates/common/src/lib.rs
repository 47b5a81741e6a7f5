pub mod types;
pub mod utils;
pub mod http;
pub mod observability;
