//! Catalog services
//!
//! One service per collection. Each owns the write rules for its entity
//! (reference checks, scoped uniqueness, status rules) and the read-side
//! joins handlers return.

pub mod category;
pub mod product;
pub mod subcategory;

pub use category::{CategoryQuery, CategoryService};
pub use product::{ProductQuery, ProductService};
pub use subcategory::{SubcategoryQuery, SubcategoryService};

use crate::store::{CATEGORIES, PRODUCTS, SUBCATEGORIES, StoreError};
use crate::utils::{AppError, ErrorCode};

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { collection, id } => {
                let code = match collection {
                    CATEGORIES => ErrorCode::CategoryNotFound,
                    SUBCATEGORIES => ErrorCode::SubcategoryNotFound,
                    PRODUCTS => ErrorCode::ProductNotFound,
                    _ => ErrorCode::NotFound,
                };
                AppError::new(code).with_detail("id", id)
            }
            // unique index hit: same error as the service pre-check
            StoreError::Duplicate { collection, key } => {
                let code = match collection {
                    CATEGORIES => ErrorCode::CategoryNameExists,
                    SUBCATEGORIES => ErrorCode::SubcategoryNameExists,
                    _ => ErrorCode::AlreadyExists,
                };
                tracing::debug!(collection, key = %key, "Unique index rejected write");
                AppError::new(code)
            }
            StoreError::Database(msg) => AppError::database(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_mapping() {
        let err: AppError = StoreError::Duplicate {
            collection: CATEGORIES,
            key: "p/shoes".into(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::CategoryNameExists);
        assert_eq!(err.http_status(), http::StatusCode::BAD_REQUEST);

        let err: AppError = StoreError::NotFound {
            collection: PRODUCTS,
            id: "x".into(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::ProductNotFound);
        assert_eq!(err.http_status(), http::StatusCode::NOT_FOUND);

        let err: AppError = StoreError::Database("down".into()).into();
        assert_eq!(err.http_status(), http::StatusCode::INTERNAL_SERVER_ERROR);
    }
}
