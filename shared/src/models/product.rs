//! Product Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Status;

/// Product entity
///
/// `category` is always copied from the product's subcategory on write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Primary image path/URL
    pub image: Option<String>,
    /// Gallery image paths/URLs
    #[serde(default)]
    pub images: Vec<String>,
    pub original_price: f64,
    pub discount_price: f64,
    /// `round((original - discount) / original * 100)`
    pub discount_percentage: u32,
    pub subcategory: String,
    /// Denormalized from the subcategory
    pub category: String,
    pub brand: Option<String>,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub is_featured: bool,
    pub status: Status,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create product payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub original_price: f64,
    pub discount_price: f64,
    pub subcategory: String,
    pub brand: Option<String>,
    pub stock: Option<i64>,
    pub is_featured: Option<bool>,
    pub status: Option<Status>,
}

/// Update product payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub images: Option<Vec<String>>,
    pub original_price: Option<f64>,
    pub discount_price: Option<f64>,
    pub subcategory: Option<String>,
    pub brand: Option<String>,
    pub stock: Option<i64>,
    pub is_featured: Option<bool>,
    pub status: Option<Status>,
}

/// Paginated product listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductListResponse {
    pub page: u32,
    pub pages: u32,
    pub total: u64,
    pub count: usize,
    pub data: Vec<Product>,
}
