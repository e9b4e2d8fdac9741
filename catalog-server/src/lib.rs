//! Catalog Server - 电商商品目录层级服务
//!
//! # 架构概述
//!
//! - **层级维护** (`hierarchy`): 环检测、Inactive 状态级联、树组装
//! - **文档存储** (`store`): 集合接口 + 内存实现，带排序规则的作用域唯一索引
//! - **认证** (`auth`): JWT，写操作需管理员
//! - **HTTP API** (`api`): 分类 / 子分类 / 商品接口
//! - **在线登记** (`presence`): WebSocket 连接与用户的映射
//!
//! # 模块结构
//!
//! ```text
//! catalog-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证、管理员检查
//! ├── api/           # HTTP 路由和处理器
//! ├── services/      # 分类 / 子分类 / 商品业务规则
//! ├── hierarchy/     # 环检测、级联、树
//! ├── store/         # 文档存储
//! ├── middleware/    # 请求日志
//! └── utils/         # 日志、校验
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod hierarchy;
pub mod middleware;
pub mod presence;
pub mod pricing;
pub mod services;
pub mod store;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState, build_router};
pub use presence::PresenceRegistry;
pub use store::Store;
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
   ______      __        __
  / ____/___ _/ /_____ _/ /___  ____ _
 / /   / __ `/ __/ __ `/ / __ \/ __ `/
/ /___/ /_/ / /_/ /_/ / / /_/ / /_/ /
\____/\__,_/\__/\__,_/_/\____/\__, /
                             /____/
    "#
    );
}
