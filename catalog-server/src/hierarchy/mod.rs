//! Category hierarchy maintenance
//!
//! - `cycle`: ancestor walk for re-parenting
//! - `cascade`: descendant walk + bulk Inactive update
//! - `tree`: flat list → nested forest

pub mod cascade;
pub mod cycle;
pub mod tree;

pub use cascade::{cascade_inactive, collect_descendant_ids};
pub use cycle::would_create_cycle;
pub use tree::{TreeItem, build_tree};
