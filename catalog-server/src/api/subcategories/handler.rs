//! Subcategory API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use shared::models::{
    Subcategory, SubcategoryCreate, SubcategoryDetail, SubcategoryListResponse, SubcategoryUpdate,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::services::SubcategoryQuery;
use crate::utils::{ApiResponse, AppResult};

/// GET /api/subcategories - 分页列表 (可按 category / name / status 过滤)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<SubcategoryQuery>,
) -> AppResult<Json<SubcategoryListResponse>> {
    let page = state
        .subcategories()
        .list(&query, state.config.max_page_limit)
        .await?;
    Ok(Json(page))
}

/// GET /api/subcategories/{id} - 子分类详情 (含所属分类名称和商品)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<SubcategoryDetail>> {
    let detail = state.subcategories().detail(&id).await?;
    Ok(Json(detail))
}

/// POST /api/subcategories/create - 创建子分类
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<SubcategoryCreate>,
) -> AppResult<(StatusCode, ApiResponse<Subcategory>)> {
    let subcategory = state.subcategories().create(payload, Some(user.id)).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::success_with_message("Subcategory created successfully", subcategory),
    ))
}

/// PUT /api/subcategories/update/{id} - 更新子分类
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<SubcategoryUpdate>,
) -> AppResult<ApiResponse<Subcategory>> {
    let subcategory = state.subcategories().update(&id, payload).await?;
    Ok(ApiResponse::success_with_message(
        "Subcategory updated successfully",
        subcategory,
    ))
}

/// DELETE /api/subcategories/delete/{id} - 删除子分类
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Subcategory>> {
    let removed = state.subcategories().delete(&id).await?;
    Ok(ApiResponse::success_with_message(
        "Subcategory deleted successfully",
        removed,
    ))
}
