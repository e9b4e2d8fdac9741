//! 认证授权模块
//!
//! 提供 JWT 认证和管理员鉴权中间件：
//! - [`JwtService`] - JWT 令牌服务
//! - [`CurrentUser`] - 当前用户上下文
//! - [`require_auth`] - 认证中间件 (写操作)
//! - [`require_admin`] - 管理员检查中间件

pub mod extractor;
pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService, ROLE_ADMIN};
pub use middleware::{CurrentUserExt, require_admin, require_auth};
