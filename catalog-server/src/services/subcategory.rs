//! Subcategory Service

use std::collections::HashMap;

use chrono::Utc;
use serde::Deserialize;
use shared::models::{
    Category, Product, Status, Subcategory, SubcategoryCreate, SubcategoryDetail,
    SubcategoryListResponse, SubcategorySummary, SubcategoryUpdate,
};
use shared::pagination::{PageRequest, total_pages};
use shared::util::non_blank;

use crate::store::{FindOptions, ProductFilter, Sort, Store, SubcategoryFilter};
use crate::utils::validation::{MAX_DESCRIPTION_LEN, MAX_URL_LEN, require_name, validate_optional_text};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Default page size of the subcategory listing
pub const DEFAULT_LIMIT: u32 = 20;

/// Products embedded in a subcategory detail
pub const DETAIL_PRODUCTS: usize = 20;

/// Query parameters of `GET /api/subcategories`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubcategoryQuery {
    /// Owning category id
    pub category: Option<String>,
    /// Case-insensitive substring of the name
    pub name: Option<String>,
    pub status: Option<Status>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Clone)]
pub struct SubcategoryService {
    store: Store,
}

impl SubcategoryService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn find(&self, id: &str) -> AppResult<Subcategory> {
        self.store
            .subcategories
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::SubcategoryNotFound).with_detail("id", id))
    }

    async fn find_category(&self, id: &str) -> AppResult<Category> {
        self.store
            .categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::CategoryNotFound).with_detail("category", id))
    }

    async fn ensure_name_free(
        &self,
        name: &str,
        category: &str,
        exclude_id: Option<&str>,
    ) -> AppResult<()> {
        let filter = SubcategoryFilter {
            category: Some(category.to_string()),
            name: Some(name.to_string()),
            exclude_id: exclude_id.map(str::to_string),
            ..Default::default()
        };
        if self.store.subcategories.find_one(&filter).await?.is_some() {
            return Err(AppError::new(ErrorCode::SubcategoryNameExists).with_detail("name", name));
        }
        Ok(())
    }

    // ========== Write path ==========

    pub async fn create(
        &self,
        input: SubcategoryCreate,
        created_by: Option<String>,
    ) -> AppResult<Subcategory> {
        let name = require_name(&input.name, "name")?;
        validate_optional_text(&input.description, "description", MAX_DESCRIPTION_LEN)?;
        validate_optional_text(&input.image, "image", MAX_URL_LEN)?;

        let category_id = input.category.trim();
        if category_id.is_empty() {
            return Err(AppError::validation("category must not be empty"));
        }
        let category = self.find_category(category_id).await?;

        let status = input.status.unwrap_or_default();
        if status.is_active() && !category.status.is_active() {
            return Err(AppError::new(ErrorCode::SubcategoryCategoryInactive));
        }

        self.ensure_name_free(&name, &category.id, None).await?;

        let now = Utc::now();
        let subcategory = Subcategory {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            description: input.description.unwrap_or_default(),
            image: input.image.unwrap_or_default(),
            status,
            category: category.id,
            created_by,
            created_at: now,
            updated_at: now,
        };

        let created = self.store.subcategories.create(subcategory).await?;
        tracing::info!(subcategory_id = %created.id, category_id = %created.category, "Subcategory created");
        Ok(created)
    }

    /// Partial update
    ///
    /// Moving to another category re-checks that category's existence, its
    /// status (when the result is Active) and name uniqueness there, then
    /// re-points the denormalized category of the subcategory's products.
    pub async fn update(&self, id: &str, patch: SubcategoryUpdate) -> AppResult<Subcategory> {
        let existing = self.find(id).await?;
        let mut subcategory = existing.clone();

        if let Some(raw) = &patch.name {
            subcategory.name = require_name(raw, "name")?;
        }
        validate_optional_text(&patch.description, "description", MAX_DESCRIPTION_LEN)?;
        validate_optional_text(&patch.image, "image", MAX_URL_LEN)?;

        let mut category_record: Option<Category> = None;
        if let Some(category_id) = non_blank(patch.category.clone()) {
            let category = self.find_category(&category_id).await?;
            subcategory.category = category.id.clone();
            category_record = Some(category);
        }
        let category_changed = subcategory.category != existing.category;

        if let Some(status) = patch.status {
            subcategory.status = status;
        }
        let status_supplied_active = patch.status.is_some_and(Status::is_active);
        if subcategory.status.is_active() && (status_supplied_active || category_changed) {
            let category = match category_record {
                Some(category) => category,
                None => self.find_category(&subcategory.category).await?,
            };
            if !category.status.is_active() {
                return Err(AppError::new(ErrorCode::SubcategoryCategoryInactive));
            }
        }

        if subcategory.name != existing.name || category_changed {
            self.ensure_name_free(&subcategory.name, &subcategory.category, Some(id))
                .await?;
        }

        if let Some(description) = patch.description {
            subcategory.description = description;
        }
        if let Some(image) = patch.image {
            subcategory.image = image;
        }
        subcategory.updated_at = Utc::now();

        let saved = self.store.subcategories.update(subcategory).await?;

        if category_changed {
            let new_category = saved.category.clone();
            let now = Utc::now();
            let moved = self
                .store
                .products
                .update_many(
                    &ProductFilter::in_subcategory(&saved.id),
                    &move |p: &mut Product| {
                        p.category = new_category.clone();
                        p.updated_at = now;
                    },
                )
                .await
                .map_err(|e| {
                    tracing::error!(subcategory_id = %saved.id, error = %e, "Product re-point failed after save");
                    AppError::internal(format!(
                        "Subcategory saved but re-pointing its products failed: {e}"
                    ))
                })?;
            tracing::info!(subcategory_id = %saved.id, products = moved, "Re-pointed product categories");
        }

        tracing::info!(subcategory_id = %saved.id, "Subcategory updated");
        Ok(saved)
    }

    /// Delete a subcategory with no products
    pub async fn delete(&self, id: &str) -> AppResult<Subcategory> {
        self.find(id).await?;

        let products = self
            .store
            .products
            .count(&ProductFilter::in_subcategory(id))
            .await?;
        if products > 0 {
            return Err(AppError::new(ErrorCode::SubcategoryHasProducts).with_detail("products", products));
        }

        let removed = self
            .store
            .subcategories
            .delete(id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::SubcategoryNotFound).with_detail("id", id))?;
        tracing::info!(subcategory_id = %id, "Subcategory deleted");
        Ok(removed)
    }

    // ========== Read path ==========

    pub async fn list(&self, query: &SubcategoryQuery, max_limit: u32) -> AppResult<SubcategoryListResponse> {
        let filter = SubcategoryFilter {
            category: non_blank(query.category.clone()),
            name_contains: non_blank(query.name.clone()),
            status: query.status,
            ..Default::default()
        };
        let page = PageRequest::resolve(query.page, query.limit, DEFAULT_LIMIT, max_limit);

        let total = self.store.subcategories.count(&filter).await?;
        let items = self
            .store
            .subcategories
            .find(
                &filter,
                FindOptions::page(Sort::NEWEST, page.skip(), page.limit as usize),
            )
            .await?;
        let data = self.summarize(items).await?;

        Ok(SubcategoryListResponse {
            page: page.page,
            pages: total_pages(total, page.limit),
            total,
            count: data.len(),
            data,
        })
    }

    /// Subcategory with its category name and its newest products
    pub async fn detail(&self, id: &str) -> AppResult<SubcategoryDetail> {
        let subcategory = self.find(id).await?;
        let products = self
            .store
            .products
            .find(
                &ProductFilter::in_subcategory(id),
                FindOptions::page(Sort::NEWEST, 0, DETAIL_PRODUCTS),
            )
            .await?;
        let summary = self
            .summarize(vec![subcategory])
            .await?
            .pop()
            .ok_or_else(|| AppError::internal("Subcategory summary missing"))?;

        Ok(SubcategoryDetail {
            subcategory: summary,
            products,
        })
    }

    async fn summarize(&self, items: Vec<Subcategory>) -> AppResult<Vec<SubcategorySummary>> {
        let mut names: HashMap<String, Option<String>> = HashMap::new();
        let mut summaries = Vec::with_capacity(items.len());

        for subcategory in items {
            if !names.contains_key(&subcategory.category) {
                let name = self
                    .store
                    .categories
                    .find_by_id(&subcategory.category)
                    .await?
                    .map(|c| c.name);
                names.insert(subcategory.category.clone(), name);
            }
            let category_name = names.get(&subcategory.category).cloned().flatten();
            summaries.push(SubcategorySummary {
                subcategory,
                category_name,
            });
        }

        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{CategoryService, ProductService};
    use crate::store::{Collection, Mutation, StoreError, StoreResult};
    use async_trait::async_trait;
    use shared::models::{CategoryCreate, CategoryUpdate, ProductCreate};
    use std::sync::Arc;

    struct Fixture {
        categories: CategoryService,
        subcategories: SubcategoryService,
        products: ProductService,
    }

    fn fixture() -> Fixture {
        let store = Store::in_memory();
        Fixture {
            categories: CategoryService::new(store.clone()),
            subcategories: SubcategoryService::new(store.clone()),
            products: ProductService::new(store),
        }
    }

    async fn category(f: &Fixture, name: &str, status: Status) -> Category {
        f.categories
            .create(
                CategoryCreate {
                    name: name.into(),
                    status: Some(status),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap()
    }

    fn input(name: &str, category: &str) -> SubcategoryCreate {
        SubcategoryCreate {
            name: name.into(),
            category: category.into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_requires_existing_category() {
        let f = fixture();
        let err = f
            .subcategories
            .create(input("Sneakers", "ghost"), None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CategoryNotFound);

        let err = f.subcategories.create(input("Sneakers", " "), None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn test_name_unique_per_category() {
        let f = fixture();
        let shoes = category(&f, "Shoes", Status::Active).await;
        let bags = category(&f, "Bags", Status::Active).await;

        f.subcategories.create(input("Sport", &shoes.id), None).await.unwrap();
        let err = f
            .subcategories
            .create(input("SPORT", &shoes.id), None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::SubcategoryNameExists);

        f.subcategories.create(input("Sport", &bags.id), None).await.unwrap();
    }

    #[tokio::test]
    async fn test_active_requires_active_category() {
        let f = fixture();
        let closed = category(&f, "Closed", Status::Inactive).await;

        let err = f
            .subcategories
            .create(input("Sport", &closed.id), None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::SubcategoryCategoryInactive);

        let sub = f
            .subcategories
            .create(
                SubcategoryCreate {
                    status: Some(Status::Inactive),
                    ..input("Sport", &closed.id)
                },
                None,
            )
            .await
            .unwrap();

        let err = f
            .subcategories
            .update(
                &sub.id,
                SubcategoryUpdate {
                    status: Some(Status::Active),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::SubcategoryCategoryInactive);
    }

    #[tokio::test]
    async fn test_category_cascade_leaves_subcategories_alone() {
        let f = fixture();
        let shoes = category(&f, "Shoes", Status::Active).await;
        let sub = f.subcategories.create(input("Sport", &shoes.id), None).await.unwrap();

        f.categories
            .update(
                &shoes.id,
                CategoryUpdate {
                    status: Some(Status::Inactive),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(f.subcategories.find(&sub.id).await.unwrap().status, Status::Active);
    }

    #[tokio::test]
    async fn test_move_repoints_products() {
        let f = fixture();
        let shoes = category(&f, "Shoes", Status::Active).await;
        let bags = category(&f, "Bags", Status::Active).await;
        let sub = f.subcategories.create(input("Sport", &shoes.id), None).await.unwrap();
        let product = f
            .products
            .create(
                ProductCreate {
                    name: "Runner".into(),
                    original_price: 100.0,
                    discount_price: 80.0,
                    subcategory: sub.id.clone(),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap();
        assert_eq!(product.category, shoes.id);

        f.subcategories
            .update(
                &sub.id,
                SubcategoryUpdate {
                    category: Some(bags.id.clone()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(f.products.find(&product.id).await.unwrap().category, bags.id);
    }

    #[tokio::test]
    async fn test_delete_blocked_by_products() {
        let f = fixture();
        let shoes = category(&f, "Shoes", Status::Active).await;
        let sub = f.subcategories.create(input("Sport", &shoes.id), None).await.unwrap();
        let product = f
            .products
            .create(
                ProductCreate {
                    name: "Runner".into(),
                    original_price: 100.0,
                    discount_price: 80.0,
                    subcategory: sub.id.clone(),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap();

        let err = f.subcategories.delete(&sub.id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::SubcategoryHasProducts);

        f.products.delete(&product.id).await.unwrap();
        f.subcategories.delete(&sub.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_and_detail() {
        let f = fixture();
        let shoes = category(&f, "Shoes", Status::Active).await;
        let bags = category(&f, "Bags", Status::Active).await;
        for name in ["Sport", "Formal", "Casual"] {
            f.subcategories.create(input(name, &shoes.id), None).await.unwrap();
        }
        let tote = f.subcategories.create(input("Tote", &bags.id), None).await.unwrap();

        let listed = f
            .subcategories
            .list(
                &SubcategoryQuery {
                    category: Some(shoes.id.clone()),
                    limit: Some(2),
                    ..Default::default()
                },
                100,
            )
            .await
            .unwrap();
        assert_eq!(listed.total, 3);
        assert_eq!(listed.pages, 2);
        assert_eq!(listed.count, 2);
        assert!(listed.data.iter().all(|s| s.category_name.as_deref() == Some("Shoes")));

        let detail = f.subcategories.detail(&tote.id).await.unwrap();
        assert_eq!(detail.subcategory.category_name.as_deref(), Some("Bags"));
        assert!(detail.products.is_empty());
    }

    /// Product collection whose bulk update always fails
    struct FailingBulk(crate::store::MemoryCollection<Product>);

    #[async_trait]
    impl Collection<Product> for FailingBulk {
        async fn find(&self, f: &ProductFilter, o: FindOptions) -> StoreResult<Vec<Product>> {
            self.0.find(f, o).await
        }
        async fn find_one(&self, f: &ProductFilter) -> StoreResult<Option<Product>> {
            self.0.find_one(f).await
        }
        async fn find_by_id(&self, id: &str) -> StoreResult<Option<Product>> {
            self.0.find_by_id(id).await
        }
        async fn count(&self, f: &ProductFilter) -> StoreResult<u64> {
            self.0.count(f).await
        }
        async fn create(&self, doc: Product) -> StoreResult<Product> {
            self.0.create(doc).await
        }
        async fn update(&self, doc: Product) -> StoreResult<Product> {
            self.0.update(doc).await
        }
        async fn update_many(&self, _: &ProductFilter, _: &Mutation<Product>) -> StoreResult<u64> {
            Err(StoreError::Database("bulk write lost".into()))
        }
        async fn delete(&self, id: &str) -> StoreResult<Option<Product>> {
            self.0.delete(id).await
        }
    }

    #[tokio::test]
    async fn test_failed_repoint_reports_internal_after_save() {
        let mut store = Store::in_memory();
        store.products = Arc::new(FailingBulk(Default::default()));
        let f = Fixture {
            categories: CategoryService::new(store.clone()),
            subcategories: SubcategoryService::new(store.clone()),
            products: ProductService::new(store),
        };

        let shoes = category(&f, "Shoes", Status::Active).await;
        let bags = category(&f, "Bags", Status::Active).await;
        let sub = f.subcategories.create(input("Sport", &shoes.id), None).await.unwrap();
        let product = f
            .products
            .create(
                ProductCreate {
                    name: "Runner".into(),
                    original_price: 100.0,
                    discount_price: 80.0,
                    subcategory: sub.id.clone(),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap();

        let err = f
            .subcategories
            .update(
                &sub.id,
                SubcategoryUpdate {
                    category: Some(bags.id.clone()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InternalError);

        // move saved, product still points at the old category
        assert_eq!(f.subcategories.find(&sub.id).await.unwrap().category, bags.id);
        assert_eq!(f.products.find(&product.id).await.unwrap().category, shoes.id);
    }
}
