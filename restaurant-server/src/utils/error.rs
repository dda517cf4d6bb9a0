//! 统一错误处理
//!
//! | 变体 | 响应 |
//! |------|------|
//! | `AuthRequired` | 303 → `/admin-login` |
//! | `Validation` / `BadRequest` | 400 |
//! | `Storage` / `Template` / `Internal` | 500 (记录日志, 不暴露细节) |
//!
//! Handlers that own a form (admin menu) catch `Validation` themselves and
//! render it inline; this impl is the fallback for everything else.

use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    extract::rejection::FormRejection,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use shared::ValidationError;
use tracing::error;

use crate::db::StoreError;

/// Login page the admin gate redirects to
pub const LOGIN_PATH: &str = "/admin-login";

/// 应用错误枚举
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 未登录 (重定向到登录页)
    #[error("Authentication required")]
    AuthRequired,

    /// 表单校验失败 (400)
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// 请求格式错误 (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// 数据文件读写失败 (500)
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    /// 模板渲染失败 (500)
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    /// 内部错误 (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::AuthRequired => Redirect::to(LOGIN_PATH).into_response(),
            AppError::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AppError::Storage(e) => {
                error!(target: "storage", error = %e, "Storage error occurred");
                internal_error_response()
            }
            AppError::Template(e) => {
                error!(target: "internal", error = %e, "Template rendering failed");
                internal_error_response()
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                internal_error_response()
            }
        }
    }
}

fn internal_error_response() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        AppError::BadRequest(format!("Multipart error: {}", e))
    }
}

impl From<MultipartRejection> for AppError {
    fn from(e: MultipartRejection) -> Self {
        AppError::BadRequest(format!("Multipart error: {}", e.body_text()))
    }
}

impl From<FormRejection> for AppError {
    fn from(e: FormRejection) -> Self {
        AppError::BadRequest(format!("Form error: {}", e.body_text()))
    }
}
