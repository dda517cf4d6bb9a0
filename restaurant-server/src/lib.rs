//! Restaurant Server - 餐厅网站
//!
//! # 架构概述
//!
//! 单进程 HTTP 服务，提供：
//!
//! - **公开页面** (`api/public`): 首页、菜单、订座、点单
//! - **管理后台** (`api/admin`): 密码登录，查看/删除订座和订单，维护菜单
//! - **二维码** (`api/qr`): 菜单/订座/点单页面的 PNG 二维码
//! - **存储** (`db`): 每个集合一个 JSON 文件
//! - **多语言** (`i18n`): 芬兰语 (默认) 和英语
//!
//! # 模块结构
//!
//! ```text
//! restaurant-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # 管理员会话
//! ├── services/      # 图片上传、二维码
//! ├── api/           # HTTP 路由和处理器
//! ├── i18n/          # 翻译表
//! ├── utils/         # 错误、日志
//! └── db/            # JSON 文件存储
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod i18n;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use auth::{AdminSession, SessionService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

pub use utils::logger::init_logger;

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

/// 设置运行环境: 加载 `.env`，初始化日志
///
/// 日志级别取 `LOG_LEVEL` (默认 info)，`LOG_DIR` 指向已存在的目录时写入滚动文件。
pub fn setup_environment() -> anyhow::Result<()> {
    // .env 不存在不是错误
    let _ = dotenv::dotenv();

    let log_level = core::config::env_opt("LOG_LEVEL").unwrap_or_else(|| "info".into());
    let log_dir = core::config::env_opt("LOG_DIR");
    init_logger(&log_level, log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    ____            __                              __
   / __ \___  _____/ /_____ ___  ___________ _____  / /_
  / /_/ / _ \/ ___/ __/ __ `/ / / / ___/ __ `/ __ \/ __/
 / _, _/  __(__  ) /_/ /_/ / /_/ / /  / /_/ / / / / /_
/_/ |_|\___/____/\__/\__,_/\__,_/_/   \__,_/_/ /_/\__/
    "#
    );
}
