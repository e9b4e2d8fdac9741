//! Name collation for scoped unique indexes
//!
//! Two names collide when they differ only by letter case, diacritics or
//! compatibility forms ("Shoes" / "shöes", "Straße" / "STRASSE", "ﬁle" / "file").
//! Comparison works on a folded key.

use caseless::Caseless;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Fold a name into its comparison key
///
/// Trims, then applies compatibility caseless folding (NFD, case fold, NFKD,
/// case fold, NFKD), drops combining marks and spells out the æ / œ
/// ligatures.
pub fn fold(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    let folded = name
        .trim()
        .chars()
        .nfd()
        .default_case_fold()
        .nfkd()
        .default_case_fold()
        .nfkd()
        .filter(|c| !is_combining_mark(*c));
    for c in folded {
        match c {
            'æ' => key.push_str("ae"),
            'œ' => key.push_str("oe"),
            _ => key.push(c),
        }
    }
    key
}

/// Whether two names are equal under the collation
pub fn names_equal(a: &str, b: &str) -> bool {
    fold(a) == fold(b)
}

/// Case-insensitive substring match used by `name` list filters
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
