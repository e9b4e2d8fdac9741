//! Category API 模块
//!
//! | 路径 | 方法 | 权限 |
//! |------|------|------|
//! | /api/categories | GET | 公开 (`nested=true` 返回树) |
//! | /api/categories/{id} | GET | 公开 |
//! | /api/categories/create | POST | 管理员 |
//! | /api/categories/update/{id} | PUT | 管理员 |
//! | /api/categories/delete/{id} | DELETE | 管理员 |

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/categories", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id));

    let manage_routes = Router::new()
        .route("/create", post(handler::create))
        .route("/update/{id}", put(handler::update))
        .route("/delete/{id}", delete(handler::delete))
        .layer(middleware::from_fn(require_admin));

    read_routes.merge(manage_routes)
}
