//! API 路由模块
//!
//! # 结构
//!
//! - [`public`] - 首页、菜单、订座、点单
//! - [`admin`] - 登录/登出、订座/订单/菜单管理
//! - [`qr`] - 二维码
//! - [`health`] - 健康检查
//! - [`views`] - 模板使用的视图类型
//!
//! 页面由 Askama 模板渲染 (`templates/`)。

pub mod admin;
pub mod health;
pub mod public;
pub mod qr;
pub mod views;

use askama::Template;
use axum::Form;
use axum::extract::DefaultBodyLimit;
use axum::extract::rejection::FormRejection;
use axum::response::Html;
use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;

use crate::core::ServerState;
use crate::utils::AppResult;

/// Room for the text fields sent next to an image upload
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// Request body limit: twice the image limit plus form overhead, so an
/// oversized image is still read in full and reported by the upload
/// validation instead of being cut off mid-stream.
pub fn body_limit(max_upload_bytes: usize) -> usize {
    max_upload_bytes
        .saturating_mul(2)
        .saturating_add(FORM_OVERHEAD_BYTES)
}

/// HTTP 请求日志中间件
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();

    tracing::info!(target: "http_access", "{} {} {}", method, uri, status);

    response
}

/// Build the full application router
pub fn build_app(state: ServerState) -> Router {
    health::mark_started();

    let static_dir = state.config.static_dir.clone();
    let limit = body_limit(state.config.max_upload_bytes);

    Router::<ServerState>::new()
        .merge(public::router())
        .merge(admin::router())
        .merge(qr::router())
        .merge(health::router())
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(DefaultBodyLimit::max(limit))
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(log_request))
}

/// Fields of a public form; a body sent without the urlencoded
/// `Content-Type` counts as a form with every field missing.
pub fn form_or_default<T: Default>(form: Result<Form<T>, FormRejection>) -> AppResult<T> {
    match form {
        Ok(Form(value)) => Ok(value),
        Err(FormRejection::InvalidFormContentType(_)) => Ok(T::default()),
        Err(e) => Err(e.into()),
    }
}

/// Render an Askama template into an HTML response
pub fn render<T: Template>(template: T) -> AppResult<Html<String>> {
    Ok(Html(template.render()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::FromRequest;
    use shared::models::ReservationCreate;

    #[test]
    fn test_body_limit_leaves_room_for_oversized_image() {
        assert_eq!(body_limit(1024), 2048 + FORM_OVERHEAD_BYTES);
        assert!(body_limit(5 * 1024 * 1024) > 5 * 1024 * 1024 + FORM_OVERHEAD_BYTES);
        assert_eq!(body_limit(usize::MAX), usize::MAX);
    }

    #[tokio::test]
    async fn test_form_without_content_type_is_empty() {
        let request = http::Request::post("/reservation")
            .body(axum::body::Body::from("name=ignored"))
            .unwrap();
        let form = Form::<ReservationCreate>::from_request(request, &()).await;

        let data = form_or_default(form).unwrap();
        assert_eq!(data.name, "");
    }
}
