//! Business-side operations: validate, call the data service, shape the result.

pub mod categories;
pub mod inventory;
pub mod products;
pub mod validation;

pub use categories::CategoryService;
pub use inventory::InventoryService;
pub use products::ProductService;
