//! Product Service
//!
//! Products are leaves of the hierarchy: each points at one subcategory and
//! carries that subcategory's category as a denormalized copy.

use chrono::Utc;
use serde::Deserialize;
use shared::models::{Product, ProductCreate, ProductListResponse, ProductUpdate, Status, Subcategory};
use shared::pagination::{PageRequest, total_pages};
use shared::util::non_blank;

use crate::pricing::{discount_percentage, validate_prices};
use crate::store::{FindOptions, ProductFilter, Sort, SortField, Store};
use crate::utils::validation::{
    MAX_DESCRIPTION_LEN, MAX_NAME_LEN, MAX_URL_LEN, require_name, validate_images,
    validate_optional_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Default page size of the product listing
pub const DEFAULT_LIMIT: u32 = 20;

/// Default size of the best-deals list
pub const DEFAULT_DEALS: u32 = 10;

/// Query parameters of `GET /api/products/list`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub subcategory: Option<String>,
    /// Case-insensitive substring of the name
    pub name: Option<String>,
    /// Inclusive bounds on the discount price
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub status: Option<Status>,
    /// `name`, `price`, `createdAt` or `discountPercentage`; `-` prefix = descending
    pub sort_by: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Parse a `sort_by` value
pub fn parse_sort(raw: &str) -> AppResult<Sort> {
    let raw = raw.trim();
    let (descending, key) = match raw.strip_prefix('-') {
        Some(key) => (true, key),
        None => (false, raw),
    };
    let field = match key {
        "name" => SortField::Name,
        "price" => SortField::Price,
        "createdAt" | "created_at" => SortField::CreatedAt,
        "discountPercentage" | "discount_percentage" => SortField::DiscountPercentage,
        _ => {
            return Err(AppError::validation(format!("Unsupported sort field: {raw}")));
        }
    };
    Ok(Sort { field, descending })
}

#[derive(Clone)]
pub struct ProductService {
    store: Store,
}

impl ProductService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn find(&self, id: &str) -> AppResult<Product> {
        self.store
            .products
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound).with_detail("id", id))
    }

    async fn find_subcategory(&self, id: &str) -> AppResult<Subcategory> {
        self.store
            .subcategories
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::SubcategoryNotFound).with_detail("subcategory", id))
    }

    // ========== Write path ==========

    pub async fn create(&self, input: ProductCreate, created_by: Option<String>) -> AppResult<Product> {
        let name = require_name(&input.name, "name")?;
        validate_optional_text(&input.description, "description", MAX_DESCRIPTION_LEN)?;
        validate_optional_text(&input.image, "image", MAX_URL_LEN)?;
        validate_optional_text(&input.brand, "brand", MAX_NAME_LEN)?;
        validate_images(&input.images)?;
        validate_prices(input.original_price, input.discount_price)?;

        let stock = input.stock.unwrap_or(0);
        if stock < 0 {
            return Err(AppError::with_message(
                ErrorCode::ValueOutOfRange,
                "stock must not be negative",
            ));
        }

        let subcategory_id = input.subcategory.trim();
        if subcategory_id.is_empty() {
            return Err(AppError::validation("subcategory must not be empty"));
        }
        let subcategory = self.find_subcategory(subcategory_id).await?;

        let now = Utc::now();
        let product = Product {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            description: input.description.unwrap_or_default(),
            image: non_blank(input.image),
            images: input.images,
            original_price: input.original_price,
            discount_price: input.discount_price,
            discount_percentage: discount_percentage(input.original_price, input.discount_price),
            category: subcategory.category,
            subcategory: subcategory.id,
            brand: non_blank(input.brand),
            stock,
            is_featured: input.is_featured.unwrap_or(false),
            status: input.status.unwrap_or_default(),
            created_by,
            created_at: now,
            updated_at: now,
        };

        let created = self.store.products.create(product).await?;
        tracing::info!(product_id = %created.id, subcategory_id = %created.subcategory, "Product created");
        Ok(created)
    }

    /// Partial update
    ///
    /// A new subcategory re-derives the category; a new price on either side
    /// re-validates the pair and recomputes the percentage.
    pub async fn update(&self, id: &str, patch: ProductUpdate) -> AppResult<Product> {
        let mut product = self.find(id).await?;

        if let Some(raw) = &patch.name {
            product.name = require_name(raw, "name")?;
        }
        validate_optional_text(&patch.description, "description", MAX_DESCRIPTION_LEN)?;
        validate_optional_text(&patch.image, "image", MAX_URL_LEN)?;
        validate_optional_text(&patch.brand, "brand", MAX_NAME_LEN)?;
        if let Some(images) = &patch.images {
            validate_images(images)?;
        }

        if let Some(subcategory_id) = non_blank(patch.subcategory) {
            let subcategory = self.find_subcategory(&subcategory_id).await?;
            product.category = subcategory.category;
            product.subcategory = subcategory.id;
        }

        if patch.original_price.is_some() || patch.discount_price.is_some() {
            let original = patch.original_price.unwrap_or(product.original_price);
            let discount = patch.discount_price.unwrap_or(product.discount_price);
            validate_prices(original, discount)?;
            product.original_price = original;
            product.discount_price = discount;
            product.discount_percentage = discount_percentage(original, discount);
        }

        if let Some(stock) = patch.stock {
            if stock < 0 {
                return Err(AppError::with_message(
                    ErrorCode::ValueOutOfRange,
                    "stock must not be negative",
                ));
            }
            product.stock = stock;
        }
        if let Some(description) = patch.description {
            product.description = description;
        }
        if let Some(image) = patch.image {
            product.image = non_blank(Some(image));
        }
        if let Some(images) = patch.images {
            product.images = images;
        }
        if let Some(brand) = patch.brand {
            product.brand = non_blank(Some(brand));
        }
        if let Some(is_featured) = patch.is_featured {
            product.is_featured = is_featured;
        }
        if let Some(status) = patch.status {
            product.status = status;
        }
        product.updated_at = Utc::now();

        let saved = self.store.products.update(product).await?;
        tracing::info!(product_id = %saved.id, "Product updated");
        Ok(saved)
    }

    pub async fn delete(&self, id: &str) -> AppResult<Product> {
        let removed = self
            .store
            .products
            .delete(id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound).with_detail("id", id))?;
        tracing::info!(product_id = %id, "Product deleted");
        Ok(removed)
    }

    // ========== Read path ==========

    pub async fn list(&self, query: &ProductQuery, max_limit: u32) -> AppResult<ProductListResponse> {
        if let (Some(min), Some(max)) = (query.min_price, query.max_price)
            && min > max
        {
            return Err(AppError::validation("min_price must not exceed max_price"));
        }

        let filter = ProductFilter {
            category: non_blank(query.category.clone()),
            subcategory: non_blank(query.subcategory.clone()),
            name_contains: non_blank(query.name.clone()),
            min_price: query.min_price,
            max_price: query.max_price,
            status: query.status,
        };
        let sort = match query.sort_by.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(raw) => parse_sort(raw)?,
            None => Sort::NEWEST,
        };
        let page = PageRequest::resolve(query.page, query.limit, DEFAULT_LIMIT, max_limit);

        let total = self.store.products.count(&filter).await?;
        let data = self
            .store
            .products
            .find(&filter, FindOptions::page(sort, page.skip(), page.limit as usize))
            .await?;

        Ok(ProductListResponse {
            page: page.page,
            pages: total_pages(total, page.limit),
            total,
            count: data.len(),
            data,
        })
    }

    /// Active products with the highest discount percentage
    pub async fn best_deals(&self, limit: Option<u32>, max_limit: u32) -> AppResult<Vec<Product>> {
        let limit = limit.unwrap_or(DEFAULT_DEALS).clamp(1, max_limit.max(1));
        let filter = ProductFilter {
            status: Some(Status::Active),
            ..Default::default()
        };
        let deals = self
            .store
            .products
            .find(
                &filter,
                FindOptions::page(Sort::desc(SortField::DiscountPercentage), 0, limit as usize),
            )
            .await?;
        Ok(deals)
    }
}
