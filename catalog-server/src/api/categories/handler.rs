//! Category API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shared::models::{Category, CategoryCreate, CategoryDetail, CategoryUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::services::CategoryQuery;
use crate::utils::{ApiResponse, AppResult};

/// GET /api/categories - 分页列表，或 `nested=true` 时返回整棵树
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<CategoryQuery>,
) -> AppResult<Response> {
    let service = state.categories();
    if query.nested {
        let tree = service.tree(&query).await?;
        return Ok(Json(tree).into_response());
    }

    let page = service
        .list(
            &query,
            state.config.default_page_limit,
            state.config.max_page_limit,
        )
        .await?;
    Ok(Json(page).into_response())
}

/// GET /api/categories/{id} - 分类详情 (含父分类名称和商品)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<CategoryDetail>> {
    let detail = state.categories().detail(&id).await?;
    Ok(Json(detail))
}

/// POST /api/categories/create - 创建分类
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<(StatusCode, ApiResponse<Category>)> {
    let category = state.categories().create(payload, Some(user.id)).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::success_with_message("Category created successfully", category),
    ))
}

/// PUT /api/categories/update/{id} - 更新分类
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<CategoryUpdate>,
) -> AppResult<ApiResponse<Category>> {
    let category = state.categories().update(&id, payload).await?;
    Ok(ApiResponse::success_with_message(
        "Category updated successfully",
        category,
    ))
}

/// DELETE /api/categories/delete/{id} - 删除分类
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Category>> {
    let removed = state.categories().delete(&id).await?;
    Ok(ApiResponse::success_with_message(
        "Category deleted successfully",
        removed,
    ))
}
