//! Document bindings and typed filters for the catalog collections

use std::cmp::Ordering;

use shared::models::{Category, Product, Status, Subcategory};

use super::collation::{contains_ignore_case, fold, names_equal};
use super::{CATEGORIES, Document, PRODUCTS, Predicate, SUBCATEGORIES, SortField, UniqueKey};

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

// ── Category ────────────────────────────────────────────────────────

/// Category query filter
///
/// Every `Some` field narrows the match; an empty filter matches all.
#[derive(Debug, Clone, Default)]
pub struct CategoryFilter {
    /// Restrict to these ids
    pub ids: Option<Vec<String>>,
    /// Exclude one id (self on update)
    pub exclude_id: Option<String>,
    /// `Some(None)` = roots only, `Some(Some(p))` = direct children of `p`
    pub parent: Option<Option<String>>,
    /// Exact name under collation
    pub name: Option<String>,
    /// Case-insensitive substring
    pub name_contains: Option<String>,
    pub status: Option<Status>,
}

impl CategoryFilter {
    pub fn children_of(parent_id: &str) -> Self {
        Self {
            parent: Some(Some(parent_id.to_string())),
            ..Default::default()
        }
    }

    pub fn ids(ids: Vec<String>) -> Self {
        Self {
            ids: Some(ids),
            ..Default::default()
        }
    }
}

impl Predicate<Category> for CategoryFilter {
    fn matches(&self, doc: &Category) -> bool {
        if let Some(ids) = &self.ids
            && !ids.iter().any(|id| id == &doc.id)
        {
            return false;
        }
        if self.exclude_id.as_deref() == Some(doc.id.as_str()) {
            return false;
        }
        if let Some(parent) = &self.parent
            && parent.as_deref() != doc.parent_category.as_deref()
        {
            return false;
        }
        if let Some(name) = &self.name
            && !names_equal(name, &doc.name)
        {
            return false;
        }
        if let Some(needle) = &self.name_contains
            && !contains_ignore_case(&doc.name, needle)
        {
            return false;
        }
        if let Some(status) = self.status
            && status != doc.status
        {
            return false;
        }
        true
    }
}

impl Document for Category {
    type Filter = CategoryFilter;

    const COLLECTION: &'static str = CATEGORIES;

    fn id(&self) -> &str {
        &self.id
    }

    fn unique_key(&self) -> Option<UniqueKey> {
        Some(UniqueKey {
            scope: self.parent_category.clone(),
            name: fold(&self.name),
        })
    }

    fn compare_by(&self, other: &Self, field: SortField) -> Ordering {
        match field {
            SortField::Name => fold(&self.name).cmp(&fold(&other.name)),
            _ => self.created_at.cmp(&other.created_at),
        }
    }
}

// ── Subcategory ─────────────────────────────────────────────────────

/// Subcategory query filter
#[derive(Debug, Clone, Default)]
pub struct SubcategoryFilter {
    pub exclude_id: Option<String>,
    pub category: Option<String>,
    pub name: Option<String>,
    pub name_contains: Option<String>,
    pub status: Option<Status>,
}

impl SubcategoryFilter {
    pub fn in_category(category_id: &str) -> Self {
        Self {
            category: Some(category_id.to_string()),
            ..Default::default()
        }
    }
}

impl Predicate<Subcategory> for SubcategoryFilter {
    fn matches(&self, doc: &Subcategory) -> bool {
        if self.exclude_id.as_deref() == Some(doc.id.as_str()) {
            return false;
        }
        if let Some(category) = &self.category
            && category != &doc.category
        {
            return false;
        }
        if let Some(name) = &self.name
            && !names_equal(name, &doc.name)
        {
            return false;
        }
        if let Some(needle) = &self.name_contains
            && !contains_ignore_case(&doc.name, needle)
        {
            return false;
        }
        if let Some(status) = self.status
            && status != doc.status
        {
            return false;
        }
        true
    }
}

impl Document for Subcategory {
    type Filter = SubcategoryFilter;

    const COLLECTION: &'static str = SUBCATEGORIES;

    fn id(&self) -> &str {
        &self.id
    }

    fn unique_key(&self) -> Option<UniqueKey> {
        Some(UniqueKey {
            scope: Some(self.category.clone()),
            name: fold(&self.name),
        })
    }

    fn compare_by(&self, other: &Self, field: SortField) -> Ordering {
        match field {
            SortField::Name => fold(&self.name).cmp(&fold(&other.name)),
            _ => self.created_at.cmp(&other.created_at),
        }
    }
}

// ── Product ─────────────────────────────────────────────────────────

/// Product query filter
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub name_contains: Option<String>,
    /// Lower bound on the discount price (inclusive)
    pub min_price: Option<f64>,
    /// Upper bound on the discount price (inclusive)
    pub max_price: Option<f64>,
    pub status: Option<Status>,
}

impl ProductFilter {
    pub fn in_category(category_id: &str) -> Self {
        Self {
            category: Some(category_id.to_string()),
            ..Default::default()
        }
    }

    pub fn in_subcategory(subcategory_id: &str) -> Self {
        Self {
            subcategory: Some(subcategory_id.to_string()),
            ..Default::default()
        }
    }
}

impl Predicate<Product> for ProductFilter {
    fn matches(&self, doc: &Product) -> bool {
        if let Some(category) = &self.category
            && category != &doc.category
        {
            return false;
        }
        if let Some(subcategory) = &self.subcategory
            && subcategory != &doc.subcategory
        {
            return false;
        }
        if let Some(needle) = &self.name_contains
            && !contains_ignore_case(&doc.name, needle)
        {
            return false;
        }
        if let Some(min) = self.min_price
            && doc.discount_price < min
        {
            return false;
        }
        if let Some(max) = self.max_price
            && doc.discount_price > max
        {
            return false;
        }
        if let Some(status) = self.status
            && status != doc.status
        {
            return false;
        }
        true
    }
}

impl Document for Product {
    type Filter = ProductFilter;

    const COLLECTION: &'static str = PRODUCTS;

    fn id(&self) -> &str {
        &self.id
    }

    fn compare_by(&self, other: &Self, field: SortField) -> Ordering {
        match field {
            SortField::CreatedAt => self.created_at.cmp(&other.created_at),
            SortField::Name => fold(&self.name).cmp(&fold(&other.name)),
            SortField::Price => cmp_f64(self.discount_price, other.discount_price),
            SortField::DiscountPercentage => self.discount_percentage.cmp(&other.discount_percentage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn category(id: &str, name: &str, parent: Option<&str>) -> Category {
        Category {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            image: String::new(),
            parent_category: parent.map(Into::into),
            status: Status::Active,
            created_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_category_filter_scope() {
        let root = category("a", "Shoes", None);
        let child = category("b", "Shoes", Some("a"));

        let roots = CategoryFilter {
            parent: Some(None),
            ..Default::default()
        };
        assert!(roots.matches(&root));
        assert!(!roots.matches(&child));

        let under_a = CategoryFilter::children_of("a");
        assert!(under_a.matches(&child));
        assert!(!under_a.matches(&root));

        assert!(CategoryFilter::default().matches(&root));
    }

    #[test]
    fn test_category_filter_name_and_exclude() {
        let doc = category("a", "Shoes", None);
        let filter = CategoryFilter {
            name: Some("SHOES".into()),
            exclude_id: Some("x".into()),
            ..Default::default()
        };
        assert!(filter.matches(&doc));

        let excluded = CategoryFilter {
            name: Some("shoes".into()),
            exclude_id: Some("a".into()),
            ..Default::default()
        };
        assert!(!excluded.matches(&doc));
    }

    #[test]
    fn test_unique_key_is_folded_and_scoped() {
        let a = category("a", "Shoes", Some("p"));
        let b = category("b", "shoes", Some("p"));
        let c = category("c", "shoes", Some("q"));
        assert_eq!(a.unique_key(), b.unique_key());
        assert_ne!(a.unique_key(), c.unique_key());
    }
}
