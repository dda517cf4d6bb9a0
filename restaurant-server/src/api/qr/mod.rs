//! 二维码路由
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /qr | GET | 二维码页面 (HTML) |
//! | /qr/menu | GET | 菜单页二维码 (PNG) |
//! | /qr/reservation | GET | 订座页二维码 (PNG) |
//! | /qr/order | GET | 点单页二维码 (PNG) |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/qr", get(handler::page))
        .route("/qr/menu", get(handler::menu))
        .route("/qr/reservation", get(handler::reservation))
        .route("/qr/order", get(handler::order))
}
