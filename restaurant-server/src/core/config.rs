use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

use crate::auth::SessionConfig;
use crate::auth::session::generate_printable_secret;

/// 配置错误 (启动时中止)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set in production builds")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },

    #[error("Failed to generate a random secret")]
    RandomFailed,
}

/// 服务器配置 - 餐厅网站的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量 (或 `.env` 文件) 覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 5000 | HTTP 服务端口 |
/// | DATA_DIR | data | JSON 数据文件目录 |
/// | STATIC_DIR | static | 静态文件目录 (上传图片在 images/menu) |
/// | ADMIN_PASSWORD | - | 管理员密码 (release 必填) |
/// | SESSION_SECRET | - | 会话签名密钥, 至少 32 字符 (release 必填) |
/// | SESSION_TTL_MINUTES | 720 | 会话有效期 (分钟) |
/// | SESSION_COOKIE_SECURE | production 时 true，否则 false | Cookie 是否带 Secure |
/// | PUBLIC_BASE_URL | - | 二维码使用的站点地址, 未设置时取请求 Host |
/// | MAX_UPLOAD_BYTES | 5242880 | 图片上传大小上限 |
/// | ENVIRONMENT | development | 运行环境 (production 影响 Cookie Secure 默认值) |
///
/// 日志相关的 `LOG_LEVEL` / `LOG_DIR` 在加载配置之前由
/// [`crate::setup_environment`] 读取。
///
/// # 示例
///
/// ```ignore
/// ADMIN_PASSWORD=9900 SESSION_SECRET=... HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP 服务端口
    pub http_port: u16,
    /// JSON 数据文件目录
    pub data_dir: PathBuf,
    /// 静态文件目录，挂载在 /static
    pub static_dir: PathBuf,
    /// 管理员共享密码
    pub admin_password: String,
    /// 会话配置
    pub session: SessionConfig,
    /// 站点对外地址 (二维码)
    pub public_base_url: Option<String>,
    /// 上传图片大小上限 (字节)
    pub max_upload_bytes: usize,
    /// 运行环境: development | production
    pub environment: String,
}

/// Default upload limit (5MB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

fn env_parse<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

pub(crate) fn env_opt(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 未设置的项使用默认值。密码和密钥在 debug 构建下可以缺省
    /// (随机生成并打印警告)，release 构建下缺省即报错。
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = env_opt("ENVIRONMENT").unwrap_or_else(|| "development".into());
        let production = is_production_env(&environment);

        Ok(Self {
            http_port: env_parse("HTTP_PORT", 5000),
            data_dir: env_opt("DATA_DIR").unwrap_or_else(|| "data".into()).into(),
            static_dir: env_opt("STATIC_DIR")
                .unwrap_or_else(|| "static".into())
                .into(),
            admin_password: load_admin_password()?,
            session: SessionConfig::from_env(production)?,
            public_base_url: env_opt("PUBLIC_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string()),
            max_upload_bytes: env_parse("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES),
            environment,
        })
    }

    /// 固定工作目录和密码的配置，不读取环境变量
    ///
    /// 常用于测试场景: `<work_dir>/data` 和 `<work_dir>/static`
    pub fn with_overrides(
        work_dir: impl AsRef<Path>,
        admin_password: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let work_dir = work_dir.as_ref();
        Ok(Self {
            http_port: 0,
            data_dir: work_dir.join("data"),
            static_dir: work_dir.join("static"),
            admin_password: admin_password.into(),
            session: SessionConfig::with_secret(generate_printable_secret()?),
            public_base_url: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            environment: "development".into(),
        })
    }

    /// 菜品图片上传目录
    pub fn upload_dir(&self) -> PathBuf {
        self.static_dir.join("images").join("menu")
    }

    /// 确保数据目录和上传目录存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(self.upload_dir())?;
        Ok(())
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        is_production_env(&self.environment)
    }
}

fn is_production_env(environment: &str) -> bool {
    environment.trim().eq_ignore_ascii_case("production")
}

fn load_admin_password() -> Result<String, ConfigError> {
    match std::env::var("ADMIN_PASSWORD") {
        Ok(password) if password.is_empty() => Err(ConfigError::Invalid {
            name: "ADMIN_PASSWORD",
            reason: "must not be empty".into(),
        }),
        Ok(password) => Ok(password),
        Err(_) => {
            #[cfg(debug_assertions)]
            {
                let password = generate_printable_secret()?;
                tracing::warn!(
                    password = %password,
                    "⚠️  ADMIN_PASSWORD not set! Using a temporary password for development."
                );
                Ok(password)
            }
            #[cfg(not(debug_assertions))]
            {
                Err(ConfigError::Missing("ADMIN_PASSWORD"))
            }
        }
    }
}
