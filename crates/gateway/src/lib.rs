pub mod client;
pub mod errors;
pub mod openapi;
pub mod routes;
pub mod services;
pub mod startup;

pub use startup::run;
