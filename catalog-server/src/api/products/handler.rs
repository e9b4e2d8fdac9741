//! Product API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use shared::models::{Product, ProductCreate, ProductListResponse, ProductUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::services::ProductQuery;
use crate::utils::{ApiResponse, AppResult};

#[derive(Debug, Deserialize)]
pub struct DealsQuery {
    pub limit: Option<u32>,
}

/// GET /api/products/list - 分页列表
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<ProductListResponse>> {
    let page = state
        .products()
        .list(&query, state.config.max_page_limit)
        .await?;
    Ok(Json(page))
}

/// GET /api/products/single/{id} - 单个商品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let product = state.products().find(&id).await?;
    Ok(Json(product))
}

/// GET /api/products/best-deals - 折扣最高的在售商品
pub async fn best_deals(
    State(state): State<ServerState>,
    Query(query): Query<DealsQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let deals = state
        .products()
        .best_deals(query.limit, state.config.max_page_limit)
        .await?;
    Ok(Json(deals))
}

/// POST /api/products/create - 创建商品
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ProductCreate>,
) -> AppResult<(StatusCode, ApiResponse<Product>)> {
    let product = state.products().create(payload, Some(user.id)).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::success_with_message("Product created successfully", product),
    ))
}

/// PUT /api/products/update/{id} - 更新商品
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<ApiResponse<Product>> {
    let product = state.products().update(&id, payload).await?;
    Ok(ApiResponse::success_with_message(
        "Product updated successfully",
        product,
    ))
}

/// DELETE /api/products/delete/{id} - 删除商品
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Product>> {
    let removed = state.products().delete(&id).await?;
    Ok(ApiResponse::success_with_message(
        "Product deleted successfully",
        removed,
    ))
}
