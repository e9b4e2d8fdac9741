use std::sync::Arc;
use std::time::Instant;

use crate::auth::JwtService;
use crate::core::Config;
use crate::presence::PresenceRegistry;
use crate::services::{CategoryService, ProductService, SubcategoryService};
use crate::store::Store;

/// 服务器状态 - 持有所有服务的引用
///
/// `ServerState` 是 Axum 路由共享的状态，所有字段都可以廉价 clone。
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 服务器配置 |
/// | store | 文档存储 (categories / subcategories / products) |
/// | jwt_service | JWT 令牌服务 |
/// | presence | 实时连接在线表 |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub store: Store,
    pub jwt_service: Arc<JwtService>,
    pub presence: Arc<PresenceRegistry>,
    started_at: Instant,
}

impl ServerState {
    /// 使用内存存储创建状态
    pub fn new(config: Config) -> Self {
        Self::with_store(config, Store::in_memory())
    }

    /// 使用指定存储创建状态
    pub fn with_store(config: Config, store: Store) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        Self {
            config: Arc::new(config),
            store,
            jwt_service,
            presence: Arc::new(PresenceRegistry::new()),
            started_at: Instant::now(),
        }
    }

    pub fn jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }

    pub fn categories(&self) -> CategoryService {
        CategoryService::new(self.store.clone())
    }

    pub fn subcategories(&self) -> SubcategoryService {
        SubcategoryService::new(self.store.clone())
    }

    pub fn products(&self) -> ProductService {
        ProductService::new(self.store.clone())
    }

    /// 运行时间 (秒)
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
