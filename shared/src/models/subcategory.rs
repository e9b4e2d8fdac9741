//! Subcategory Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Product, Status};

/// Subcategory entity, always attached to exactly one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    pub status: Status,
    /// Owning category reference
    pub category: String,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create subcategory payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubcategoryCreate {
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub category: String,
    pub status: Option<Status>,
}

/// Update subcategory payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubcategoryUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub status: Option<Status>,
}

/// Subcategory with its category name (list item)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubcategorySummary {
    #[serde(flatten)]
    pub subcategory: Subcategory,
    pub category_name: Option<String>,
}

/// Paginated subcategory listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubcategoryListResponse {
    pub page: u32,
    pub pages: u32,
    pub total: u64,
    pub count: usize,
    pub data: Vec<SubcategorySummary>,
}

/// Single subcategory with a preview of its products
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubcategoryDetail {
    pub subcategory: SubcategorySummary,
    pub products: Vec<Product>,
}
