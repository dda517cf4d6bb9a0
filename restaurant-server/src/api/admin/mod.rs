//! 管理后台路由
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /admin-login | GET/POST | 登录表单 / 提交密码 | 无 |
//! | /admin-logout | GET | 登出 | 无 |
//! | /admin | GET/POST | 订座列表 / 删除 | 管理员 |
//! | /admin/orders | GET/POST | 订单列表 / 删除 | 管理员 |
//! | /admin/menu | GET/POST | 菜单列表 / 新增或删除 | 管理员 |
//!
//! 未登录访问管理页面会被 [`AdminSession`](crate::auth::AdminSession)
//! 重定向到登录页。

mod auth;
mod menu;
mod orders;
mod reservations;

use axum::{Router, routing::get};
use serde::Deserialize;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/admin-login", get(auth::login_form).post(auth::login))
        .route("/admin-logout", get(auth::logout))
        .route(
            "/admin",
            get(reservations::list).post(reservations::delete),
        )
        .route("/admin/orders", get(orders::list).post(orders::delete))
        .route("/admin/menu", get(menu::list).post(menu::submit))
}

/// In-band delete action posted by the list pages
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DeleteForm {
    delete_id: String,
}

impl DeleteForm {
    fn target(&self) -> Option<&str> {
        let id = self.delete_id.trim();
        (!id.is_empty()).then_some(id)
    }
}
