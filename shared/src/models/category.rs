//! Category Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Product, Status};
use crate::util::double_option;

/// Category entity
///
/// Categories form a forest through `parent_category`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Stored image path/URL from the upload collaborator
    #[serde(default)]
    pub image: String,
    /// Parent category reference (`None` = root)
    pub parent_category: Option<String>,
    pub status: Status,
    /// Admin user that created the category
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create category payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryCreate {
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub parent_category: Option<String>,
    pub status: Option<Status>,
}

/// Update category payload
///
/// Absent fields stay unchanged. `parent_category: null` moves the category
/// to the root level.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub parent_category: Option<Option<String>>,
    pub status: Option<Status>,
}

/// Category with read-side annotations (flat list item)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySummary {
    #[serde(flatten)]
    pub category: Category,
    /// Name of the parent category, if any
    pub parent_name: Option<String>,
    /// Number of products denormalized onto this category
    pub product_count: u64,
}

/// Flat paginated category listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryListResponse {
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub categories: Vec<CategorySummary>,
}

/// Single category with its products
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryDetail {
    #[serde(flatten)]
    pub category: Category,
    pub parent_name: Option<String>,
    pub products: Vec<Product>,
}
