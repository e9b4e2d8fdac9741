//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`categories`] - 分类管理接口
//! - [`subcategories`] - 子分类管理接口
//! - [`products`] - 商品接口
//! - [`realtime`] - WebSocket 在线登记

pub mod categories;
pub mod health;
pub mod products;
pub mod realtime;
pub mod subcategories;

use axum::Router;

use crate::core::ServerState;

/// 合并全部路由 (未挂状态和全局中间件)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(realtime::router())
        .merge(categories::router())
        .merge(subcategories::router())
        .merge(products::router())
}
