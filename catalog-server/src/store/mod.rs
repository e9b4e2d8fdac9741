//! Document store
//!
//! A small document-store interface (find / find-one / find-by-id / create /
//! update / update-many / count / delete, with skip/limit pagination and a
//! collation-aware scoped unique index) plus the in-memory engine used by the
//! server and the tests.
//!
//! Services hold collections as `Arc<dyn Collection<D>>`, so another engine
//! only has to implement [`Collection`].

pub mod collation;
pub mod documents;
pub mod memory;

pub use documents::{CategoryFilter, ProductFilter, SubcategoryFilter};
pub use memory::MemoryCollection;

use std::cmp::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use shared::models::{Category, Product, Subcategory};
use thiserror::Error;

/// Collection names
pub const CATEGORIES: &str = "categories";
pub const SUBCATEGORIES: &str = "subcategories";
pub const PRODUCTS: &str = "products";

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {collection}/{id}")]
    NotFound { collection: &'static str, id: String },

    /// Violation of a collection's unique index
    #[error("Duplicate key in {collection}: {key}")]
    Duplicate { collection: &'static str, key: String },

    #[error("Database error: {0}")]
    Database(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Sortable fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    CreatedAt,
    Name,
    Price,
    DiscountPercentage,
}

/// Sort order for `find`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: SortField,
    pub descending: bool,
}

impl Sort {
    /// Newest first
    pub const NEWEST: Sort = Sort {
        field: SortField::CreatedAt,
        descending: true,
    };

    pub fn asc(field: SortField) -> Self {
        Self {
            field,
            descending: false,
        }
    }

    pub fn desc(field: SortField) -> Self {
        Self {
            field,
            descending: true,
        }
    }
}

impl Default for Sort {
    fn default() -> Self {
        Self::NEWEST
    }
}

/// Options for [`Collection::find`]
#[derive(Debug, Clone, Copy, Default)]
pub struct FindOptions {
    pub sort: Sort,
    pub skip: usize,
    pub limit: Option<usize>,
}

impl FindOptions {
    pub fn sorted(sort: Sort) -> Self {
        Self {
            sort,
            ..Default::default()
        }
    }

    pub fn page(sort: Sort, skip: usize, limit: usize) -> Self {
        Self {
            sort,
            skip,
            limit: Some(limit),
        }
    }
}

/// Key of a scoped unique index: `(scope, name)` compared under collation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueKey {
    pub scope: Option<String>,
    pub name: String,
}

/// Predicate over documents of one collection
pub trait Predicate<D>: Send + Sync {
    fn matches(&self, doc: &D) -> bool;
}

/// A storable document
pub trait Document: Clone + Send + Sync + 'static {
    type Filter: Predicate<Self>;

    const COLLECTION: &'static str;

    fn id(&self) -> &str;

    /// Scoped unique key, if the collection carries a unique index
    fn unique_key(&self) -> Option<UniqueKey> {
        None
    }

    /// Ascending comparison on `field`
    fn compare_by(&self, other: &Self, field: SortField) -> Ordering;
}

/// Bulk mutation applied by [`Collection::update_many`]
pub type Mutation<D> = dyn Fn(&mut D) + Send + Sync;

/// Document collection interface
#[async_trait]
pub trait Collection<D: Document>: Send + Sync {
    async fn find(&self, filter: &D::Filter, options: FindOptions) -> StoreResult<Vec<D>>;

    async fn find_one(&self, filter: &D::Filter) -> StoreResult<Option<D>>;

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<D>>;

    async fn count(&self, filter: &D::Filter) -> StoreResult<u64>;

    /// Insert a new document; fails with `Duplicate` on a unique index hit
    async fn create(&self, doc: D) -> StoreResult<D>;

    /// Replace an existing document; fails with `NotFound` or `Duplicate`
    async fn update(&self, doc: D) -> StoreResult<D>;

    /// Apply `mutation` to every matching document, returning the number touched
    async fn update_many(&self, filter: &D::Filter, mutation: &Mutation<D>) -> StoreResult<u64>;

    /// Remove by id, returning the removed document
    async fn delete(&self, id: &str) -> StoreResult<Option<D>>;
}

/// The three catalog collections
#[derive(Clone)]
pub struct Store {
    pub categories: Arc<dyn Collection<Category>>,
    pub subcategories: Arc<dyn Collection<Subcategory>>,
    pub products: Arc<dyn Collection<Product>>,
}

impl Store {
    /// In-memory store with empty collections
    pub fn in_memory() -> Self {
        Self {
            categories: Arc::new(MemoryCollection::<Category>::new()),
            subcategories: Arc::new(MemoryCollection::<Subcategory>::new()),
            products: Arc::new(MemoryCollection::<Product>::new()),
        }
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}
