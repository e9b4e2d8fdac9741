//! Unified error codes for the catalog service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Category errors
//! - 4xxx: Subcategory errors
//! - 5xxx: Product errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Token has expired
    TokenExpired = 1002,
    /// Token is invalid
    TokenInvalid = 1003,

    // ==================== 2xxx: Permission ====================
    /// Admin role required
    AdminRequired = 2002,

    // ==================== 3xxx: Category ====================
    /// Category not found
    CategoryNotFound = 3001,
    /// Parent category not found
    ParentCategoryNotFound = 3002,
    /// Category name already exists under the same parent
    CategoryNameExists = 3003,
    /// Re-parenting would create a cycle
    CategoryCycle = 3004,
    /// Category cannot be active under an inactive parent
    CategoryParentInactive = 3005,
    /// Category still has child categories or subcategories
    CategoryHasChildren = 3006,

    // ==================== 4xxx: Subcategory ====================
    /// Subcategory not found
    SubcategoryNotFound = 4001,
    /// Subcategory name already exists under the same category
    SubcategoryNameExists = 4002,
    /// Subcategory cannot be active under an inactive category
    SubcategoryCategoryInactive = 4003,
    /// Subcategory still has products
    SubcategoryHasProducts = 4004,

    // ==================== 5xxx: Product ====================
    /// Product not found
    ProductNotFound = 5001,
    /// Product has invalid price
    ProductInvalidPrice = 5002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",

            // Permission
            ErrorCode::AdminRequired => "Administrator role is required",

            // Category
            ErrorCode::CategoryNotFound => "Category not found",
            ErrorCode::ParentCategoryNotFound => "Parent category not found",
            ErrorCode::CategoryNameExists => {
                "A category with this name already exists under the same parent"
            }
            ErrorCode::CategoryCycle => "A category cannot be moved under itself or its descendants",
            ErrorCode::CategoryParentInactive => {
                "Cannot activate a category while its parent category is inactive"
            }
            ErrorCode::CategoryHasChildren => {
                "Cannot delete a category that has subcategories or child categories"
            }

            // Subcategory
            ErrorCode::SubcategoryNotFound => "Subcategory not found",
            ErrorCode::SubcategoryNameExists => {
                "A subcategory with this name already exists in this category"
            }
            ErrorCode::SubcategoryCategoryInactive => {
                "Cannot activate a subcategory while its category is inactive"
            }
            ErrorCode::SubcategoryHasProducts => {
                "Cannot delete a subcategory that has associated products"
            }

            // Product
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::ProductInvalidPrice => {
                "Discount price must be positive and lower than the original price"
            }

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::TokenExpired),
            1003 => Ok(ErrorCode::TokenInvalid),

            // Permission
            2002 => Ok(ErrorCode::AdminRequired),

            // Category
            3001 => Ok(ErrorCode::CategoryNotFound),
            3002 => Ok(ErrorCode::ParentCategoryNotFound),
            3003 => Ok(ErrorCode::CategoryNameExists),
            3004 => Ok(ErrorCode::CategoryCycle),
            3005 => Ok(ErrorCode::CategoryParentInactive),
            3006 => Ok(ErrorCode::CategoryHasChildren),

            // Subcategory
            4001 => Ok(ErrorCode::SubcategoryNotFound),
            4002 => Ok(ErrorCode::SubcategoryNameExists),
            4003 => Ok(ErrorCode::SubcategoryCategoryInactive),
            4004 => Ok(ErrorCode::SubcategoryHasProducts),

            // Product
            5001 => Ok(ErrorCode::ProductNotFound),
            5002 => Ok(ErrorCode::ProductInvalidPrice),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
