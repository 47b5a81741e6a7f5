//! Data-service operations on top of `models`.
//! - Each function takes the shared connection pool and returns wire DTOs.
//! - Field rules live in `models`; existence and uniqueness checks live here.

pub mod errors;
pub mod dto;
pub mod category_service;
pub mod product_service;
pub mod inventory_service;
mod pattern;
#[cfg(test)]
pub mod test_support;
