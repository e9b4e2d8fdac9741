//! Nested tree view

use serde::{Deserialize, Serialize};

/// A node of a nested hierarchy view
///
/// The item's own fields are flattened next to `children`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode<T> {
    #[serde(flatten)]
    pub item: T,
    pub children: Vec<TreeNode<T>>,
}

impl<T> TreeNode<T> {
    pub fn leaf(item: T) -> Self {
        Self {
            item,
            children: Vec::new(),
        }
    }
}

/// Nested category listing (`nested=true`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTreeResponse<T> {
    pub categories: Vec<TreeNode<T>>,
}
