//! 公开页面路由
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | / | GET | 首页 |
//! | /menu | GET | 菜单 (按分类、名称排序) |
//! | /reservation | GET/POST | 订座表单 / 提交 |
//! | /order | GET/POST | 点单表单 / 提交 |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::home))
        .route("/menu", get(handler::menu))
        .route(
            "/reservation",
            get(handler::reservation_form).post(handler::submit_reservation),
        )
        .route("/order", get(handler::order_form).post(handler::submit_order))
}
