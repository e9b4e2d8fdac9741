//! Category Service

use std::collections::HashMap;

use chrono::Utc;
use serde::Deserialize;
use shared::models::{
    Category, CategoryCreate, CategoryDetail, CategoryListResponse, CategorySummary,
    CategoryTreeResponse, CategoryUpdate, Status,
};
use shared::pagination::{PageRequest, total_pages};
use shared::util::non_blank;

use crate::hierarchy::{build_tree, cascade_inactive, would_create_cycle};
use crate::store::{
    CategoryFilter, FindOptions, ProductFilter, Sort, Store, SubcategoryFilter,
};
use crate::utils::validation::{MAX_DESCRIPTION_LEN, MAX_URL_LEN, require_name, validate_optional_text};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Query parameters of `GET /api/categories`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryQuery {
    /// Case-insensitive substring of the name
    pub name: Option<String>,
    pub status: Option<Status>,
    /// Full tree instead of a flat page
    #[serde(default)]
    pub nested: bool,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl CategoryQuery {
    fn filter(&self) -> CategoryFilter {
        CategoryFilter {
            name_contains: non_blank(self.name.clone()),
            status: self.status,
            ..Default::default()
        }
    }
}

#[derive(Clone)]
pub struct CategoryService {
    store: Store,
}

impl CategoryService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Load a category or fail with `CategoryNotFound`
    pub async fn find(&self, id: &str) -> AppResult<Category> {
        self.store
            .categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::CategoryNotFound).with_detail("id", id))
    }

    async fn find_parent(&self, parent_id: &str) -> AppResult<Category> {
        self.store
            .categories
            .find_by_id(parent_id)
            .await?
            .ok_or_else(|| {
                AppError::new(ErrorCode::ParentCategoryNotFound).with_detail("parent_category", parent_id)
            })
    }

    /// Best-effort scoped uniqueness pre-check; the unique index stays authoritative
    async fn ensure_name_free(
        &self,
        name: &str,
        parent: Option<&str>,
        exclude_id: Option<&str>,
    ) -> AppResult<()> {
        let filter = CategoryFilter {
            parent: Some(parent.map(str::to_string)),
            name: Some(name.to_string()),
            exclude_id: exclude_id.map(str::to_string),
            ..Default::default()
        };
        if self.store.categories.find_one(&filter).await?.is_some() {
            return Err(AppError::new(ErrorCode::CategoryNameExists).with_detail("name", name));
        }
        Ok(())
    }

    // ========== Write path ==========

    pub async fn create(&self, input: CategoryCreate, created_by: Option<String>) -> AppResult<Category> {
        let name = require_name(&input.name, "name")?;
        validate_optional_text(&input.description, "description", MAX_DESCRIPTION_LEN)?;
        validate_optional_text(&input.image, "image", MAX_URL_LEN)?;

        let parent_category = non_blank(input.parent_category);
        let status = input.status.unwrap_or_default();

        if let Some(parent_id) = parent_category.as_deref() {
            let parent = self.find_parent(parent_id).await?;
            if status.is_active() && !parent.status.is_active() {
                return Err(AppError::new(ErrorCode::CategoryParentInactive));
            }
        }

        self.ensure_name_free(&name, parent_category.as_deref(), None)
            .await?;

        let now = Utc::now();
        let category = Category {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            description: input.description.unwrap_or_default(),
            image: input.image.unwrap_or_default(),
            parent_category,
            status,
            created_by,
            created_at: now,
            updated_at: now,
        };

        let created = self.store.categories.create(category).await?;
        tracing::info!(category_id = %created.id, name = %created.name, "Category created");
        Ok(created)
    }

    /// Partial update
    ///
    /// Absent fields stay unchanged. The cycle check runs whenever
    /// `parent_category` is supplied; uniqueness only when the name or the
    /// parent actually changes; the parent-status rule when the result is
    /// Active and either the status was supplied or the parent moved.
    /// Entering Inactive from another state cascades to every descendant after
    /// the node itself is saved.
    pub async fn update(&self, id: &str, patch: CategoryUpdate) -> AppResult<Category> {
        let existing = self.find(id).await?;
        let mut category = existing.clone();

        if let Some(raw) = &patch.name {
            category.name = require_name(raw, "name")?;
        }
        validate_optional_text(&patch.description, "description", MAX_DESCRIPTION_LEN)?;
        validate_optional_text(&patch.image, "image", MAX_URL_LEN)?;

        let mut parent_record: Option<Category> = None;
        if let Some(requested) = patch.parent_category.clone() {
            let requested = non_blank(requested);
            if would_create_cycle(self.store.categories.as_ref(), id, requested.as_deref()).await? {
                return Err(AppError::new(ErrorCode::CategoryCycle).with_detail("id", id));
            }
            if let Some(parent_id) = requested.as_deref() {
                parent_record = Some(self.find_parent(parent_id).await?);
            }
            category.parent_category = requested;
        }
        let parent_changed = category.parent_category != existing.parent_category;

        if let Some(status) = patch.status {
            category.status = status;
        }
        let status_supplied_active = patch.status.is_some_and(Status::is_active);
        if category.status.is_active()
            && (status_supplied_active || parent_changed)
            && let Some(parent_id) = category.parent_category.as_deref()
        {
            let parent = match parent_record {
                Some(parent) => parent,
                None => self.find_parent(parent_id).await?,
            };
            if !parent.status.is_active() {
                return Err(AppError::new(ErrorCode::CategoryParentInactive));
            }
        }

        if category.name != existing.name || parent_changed {
            self.ensure_name_free(&category.name, category.parent_category.as_deref(), Some(id))
                .await?;
        }

        if let Some(description) = patch.description {
            category.description = description;
        }
        if let Some(image) = patch.image {
            category.image = image;
        }
        category.updated_at = Utc::now();

        let saved = self.store.categories.update(category).await?;

        if saved.status == Status::Inactive && existing.status != Status::Inactive {
            cascade_inactive(self.store.categories.as_ref(), &saved.id)
                .await
                .map_err(|e| {
                    tracing::error!(category_id = %saved.id, error = %e, "Inactive cascade failed after save");
                    AppError::internal(format!(
                        "Category saved but cascading Inactive status failed: {e}"
                    ))
                })?;
        }

        tracing::info!(category_id = %saved.id, "Category updated");
        Ok(saved)
    }

    /// Delete a category with no child categories and no subcategories
    pub async fn delete(&self, id: &str) -> AppResult<Category> {
        self.find(id).await?;

        let children = self
            .store
            .categories
            .count(&CategoryFilter::children_of(id))
            .await?;
        let subcategories = self
            .store
            .subcategories
            .count(&SubcategoryFilter::in_category(id))
            .await?;
        if children > 0 || subcategories > 0 {
            return Err(AppError::new(ErrorCode::CategoryHasChildren)
                .with_detail("child_categories", children)
                .with_detail("subcategories", subcategories));
        }

        let removed = self
            .store
            .categories
            .delete(id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::CategoryNotFound).with_detail("id", id))?;
        tracing::info!(category_id = %id, "Category deleted");
        Ok(removed)
    }

    // ========== Read path ==========

    /// Flat listing, newest first
    ///
    /// An empty result is a `CategoryNotFound` error.
    pub async fn list(
        &self,
        query: &CategoryQuery,
        default_limit: u32,
        max_limit: u32,
    ) -> AppResult<CategoryListResponse> {
        let filter = query.filter();
        let page = PageRequest::resolve(query.page, query.limit, default_limit, max_limit);

        let total = self.store.categories.count(&filter).await?;
        if total == 0 {
            return Err(AppError::with_message(
                ErrorCode::CategoryNotFound,
                "No categories found",
            ));
        }

        let items = self
            .store
            .categories
            .find(
                &filter,
                FindOptions::page(Sort::NEWEST, page.skip(), page.limit as usize),
            )
            .await?;

        Ok(CategoryListResponse {
            page: page.page,
            limit: page.limit,
            total_pages: total_pages(total, page.limit),
            total_items: total,
            categories: self.summarize(items).await?,
        })
    }

    /// Nested listing of the filtered set, without pagination
    pub async fn tree(&self, query: &CategoryQuery) -> AppResult<CategoryTreeResponse<CategorySummary>> {
        let items = self
            .store
            .categories
            .find(&query.filter(), FindOptions::sorted(Sort::NEWEST))
            .await?;
        let summaries = self.summarize(items).await?;
        Ok(CategoryTreeResponse {
            categories: build_tree(summaries, None),
        })
    }

    /// Single category with its parent's name and its products
    pub async fn detail(&self, id: &str) -> AppResult<CategoryDetail> {
        let category = self.find(id).await?;
        let parent_name = match category.parent_category.as_deref() {
            Some(parent_id) => self
                .store
                .categories
                .find_by_id(parent_id)
                .await?
                .map(|p| p.name),
            None => None,
        };
        let products = self
            .store
            .products
            .find(&ProductFilter::in_category(id), FindOptions::sorted(Sort::NEWEST))
            .await?;

        Ok(CategoryDetail {
            category,
            parent_name,
            products,
        })
    }

    /// Attach parent names and product counts
    async fn summarize(&self, items: Vec<Category>) -> AppResult<Vec<CategorySummary>> {
        let mut parent_names: HashMap<String, Option<String>> = HashMap::new();
        let mut summaries = Vec::with_capacity(items.len());

        for category in items {
            let parent_name = match category.parent_category.as_deref() {
                Some(parent_id) => {
                    if !parent_names.contains_key(parent_id) {
                        let name = self
                            .store
                            .categories
                            .find_by_id(parent_id)
                            .await?
                            .map(|p| p.name);
                        parent_names.insert(parent_id.to_string(), name);
                    }
                    parent_names.get(parent_id).cloned().flatten()
                }
                None => None,
            };
            let product_count = self
                .store
                .products
                .count(&ProductFilter::in_category(&category.id))
                .await?;

            summaries.push(CategorySummary {
                category,
                parent_name,
                product_count,
            });
        }

        Ok(summaries)
    }
}
