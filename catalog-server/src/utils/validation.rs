//! Input validation helpers
//!
//! Centralized text length constants and validation functions.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: category, subcategory, product, brand
pub const MAX_NAME_LEN: usize = 200;

/// Descriptions
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// Short identifiers (status strings, ids in query params)
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

/// Images per product
pub const MAX_IMAGES: usize = 20;

// ── Validation helpers (CRUD handlers) ──────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.chars().count() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.chars().count()
        )));
    }
    Ok(())
}

/// Validate that an optional string is within the length limit (if present).
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.chars().count() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.chars().count()
        )));
    }
    Ok(())
}

/// Trim a required name and check it; returns the trimmed value.
pub fn require_name(value: &str, field: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    validate_required_text(trimmed, field, MAX_NAME_LEN)?;
    Ok(trimmed.to_string())
}

/// Validate a list of image references
pub fn validate_images(images: &[String]) -> Result<(), AppError> {
    if images.len() > MAX_IMAGES {
        return Err(AppError::validation(format!(
            "too many images ({}, max {MAX_IMAGES})",
            images.len()
        )));
    }
    for image in images {
        validate_required_text(image, "images[]", MAX_URL_LEN)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Shoes", "name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("   ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(201), "name", MAX_NAME_LEN).is_err());
        // multi-byte chars count once
        assert!(validate_required_text(&"é".repeat(200), "name", MAX_NAME_LEN).is_ok());
    }

    #[test]
    fn test_optional_text() {
        assert!(validate_optional_text(&None, "description", 5).is_ok());
        assert!(validate_optional_text(&Some("abc".into()), "description", 5).is_ok());
        assert!(validate_optional_text(&Some("abcdef".into()), "description", 5).is_err());
    }

    #[test]
    fn test_require_name_trims() {
        assert_eq!(require_name("  Shoes ", "name").unwrap(), "Shoes");
        let err = require_name("", "name").unwrap_err();
        assert_eq!(err.message, "name must not be empty");
    }

    #[test]
    fn test_validate_images() {
        assert!(validate_images(&["a.png".into(), "b.png".into()]).is_ok());
        assert!(validate_images(&["".into()]).is_err());
        assert!(validate_images(&vec!["a.png".to_string(); 21]).is_err());
    }
}
