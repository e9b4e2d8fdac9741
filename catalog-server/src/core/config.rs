use crate::auth::JwtConfig;
use crate::core::{Result, ServerError};

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 (`RUST_LOG` 优先) |
/// | LOG_DIR | - | 日志目录，设置后按天滚动写文件 |
/// | DEFAULT_PAGE_LIMIT | 10 | 分类列表默认每页条数 |
/// | MAX_PAGE_LIMIT | 100 | 每页条数上限 |
/// | JWT_SECRET | - | 开发环境以外必填，至少 32 字符 |
/// | JWT_ISSUER | catalog-server | 令牌签发者 |
/// | JWT_AUDIENCE | catalog-clients | 令牌受众 |
/// | JWT_EXPIRATION_MINUTES | 1440 | 令牌有效期 |
///
/// # 示例
///
/// ```ignore
/// HTTP_PORT=8080 JWT_SECRET=... cargo run -p catalog-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 日志级别
    pub log_level: String,
    /// 日志目录
    pub log_dir: Option<String>,
    /// 默认分页大小
    pub default_page_limit: u32,
    /// 分页大小上限
    pub max_page_limit: u32,
    /// JWT 认证配置
    pub jwt: JwtConfig,
}

impl Config {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源加载配置
    ///
    /// 未设置的项使用默认值；无法解析的数字视为配置错误。
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "development".into());
        let development = environment == "development";

        let default_page_limit = parse_or(&lookup, "DEFAULT_PAGE_LIMIT", 10u32)?;
        let max_page_limit = parse_or(&lookup, "MAX_PAGE_LIMIT", 100u32)?;
        if default_page_limit == 0 || max_page_limit < default_page_limit {
            return Err(ServerError::Config(format!(
                "page limits out of range (default {default_page_limit}, max {max_page_limit})"
            )));
        }

        Ok(Self {
            http_port: parse_or(&lookup, "HTTP_PORT", 3000u16)?,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: lookup("LOG_DIR").filter(|d| !d.trim().is_empty()),
            default_page_limit,
            max_page_limit,
            jwt: JwtConfig::from_lookup(&lookup, development)?,
            environment,
        })
    }

    /// 测试用的确定性配置
    pub fn for_tests() -> Self {
        Self {
            http_port: 0,
            environment: "test".into(),
            log_level: "debug".into(),
            log_dir: None,
            default_page_limit: 10,
            max_page_limit: 100,
            jwt: JwtConfig {
                secret: "catalog-test-secret-0123456789abcdef".into(),
                expiration_minutes: 60,
                issuer: "catalog-server".into(),
                audience: "catalog-clients".into(),
            },
        }
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ServerError::Config(format!("{key} has an invalid value: {raw}"))),
        None => Ok(default),
    }
}
