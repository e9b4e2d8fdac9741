//! Data models
//!
//! Shared between catalog-server and API clients.
//! All IDs are `String` (UUID v4 generated by the store).

pub mod category;
pub mod product;
pub mod status;
pub mod subcategory;
pub mod tree;

// Re-exports
pub use category::*;
pub use product::*;
pub use status::*;
pub use subcategory::*;
pub use tree::*;
