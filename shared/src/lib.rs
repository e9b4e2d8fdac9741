//! Shared types for the catalog service
//!
//! Wire models, pagination helpers and the unified error system used by
//! `catalog-server` and by any client that talks to its HTTP API.

pub mod error;
pub mod models;
pub mod pagination;
pub mod util;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
