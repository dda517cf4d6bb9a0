//! 认证模块
//!
//! 单一共享密码的管理员会话：
//! - [`SessionService`] - 签发/校验/吊销会话令牌
//! - [`AdminSession`] - 管理页面的提取器 (未登录时重定向到登录页)

pub mod extractor;
pub mod session;

pub use extractor::AdminSession;
pub use session::{
    ADMIN_ROLE, SESSION_COOKIE, SessionClaims, SessionConfig, SessionError, SessionService,
};
