//! 健康检查路由
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /health | GET | 简单健康检查 | 无 |

use axum::{Json, Router, routing::get};
use serde::Serialize;
use std::time::SystemTime;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

/// 健康检查响应
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    /// 运行时间 (秒)
    uptime_seconds: u64,
}

// 服务器启动时间
static START_TIME: std::sync::OnceLock<SystemTime> = std::sync::OnceLock::new();

/// Record the start time (first call wins)
pub fn mark_started() {
    START_TIME.get_or_init(SystemTime::now);
}

fn get_uptime_seconds() -> u64 {
    let start = START_TIME.get_or_init(SystemTime::now);
    SystemTime::now()
        .duration_since(*start)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: get_uptime_seconds(),
    })
}
