//! QR code handlers
//!
//! The encoded URL is `<base>/<page>`. The base comes from
//! `PUBLIC_BASE_URL` when configured, otherwise from the request's `Host`
//! header (and `X-Forwarded-Proto` behind a proxy).

use askama::Template;
use axum::extract::State;
use axum::http::{HeaderMap, header};
use axum::response::{Html, IntoResponse, Response};

use crate::api::render;
use crate::core::ServerState;
use crate::i18n::{Lang, Translator};
use crate::services::qr::encode_png;
use crate::utils::AppResult;

const FORWARDED_PROTO: &str = "x-forwarded-proto";

#[derive(Template)]
#[template(path = "qr.html")]
struct QrTemplate {
    i18n: Translator,
    path: &'static str,
}

pub async fn page(lang: Lang) -> AppResult<Html<String>> {
    render(QrTemplate {
        i18n: Translator::new(lang),
        path: "/qr",
    })
}

pub async fn menu(State(state): State<ServerState>, headers: HeaderMap) -> AppResult<Response> {
    qr_png(&state, &headers, "/menu")
}

pub async fn reservation(
    State(state): State<ServerState>,
    headers: HeaderMap,
) -> AppResult<Response> {
    qr_png(&state, &headers, "/reservation")
}

pub async fn order(State(state): State<ServerState>, headers: HeaderMap) -> AppResult<Response> {
    qr_png(&state, &headers, "/order")
}

fn qr_png(state: &ServerState, headers: &HeaderMap, page: &str) -> AppResult<Response> {
    let url = page_url(state.config.public_base_url.as_deref(), headers, page);
    let png = encode_png(&url)?;
    tracing::debug!(url = %url, size = png.len(), "QR code generated");

    Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response())
}

/// Absolute URL of a public page, as encoded in its QR code
fn page_url(configured: Option<&str>, headers: &HeaderMap, page: &str) -> String {
    format!("{}{}", base_url(configured, headers), page)
}

/// Site root without a trailing slash
fn base_url(configured: Option<&str>, headers: &HeaderMap) -> String {
    if let Some(url) = configured {
        return url.trim_end_matches('/').to_string();
    }

    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    let scheme = headers
        .get(FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| *v == "http" || *v == "https")
        .unwrap_or("http");

    format!("{}://{}", scheme, host)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_base_url_prefers_configured() {
        let headers = HeaderMap::new();
        assert_eq!(
            base_url(Some("https://ravintola.fi/"), &headers),
            "https://ravintola.fi"
        );
    }

    #[test]
    fn test_base_url_from_host() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("127.0.0.1:5000"));
        assert_eq!(base_url(None, &headers), "http://127.0.0.1:5000");

        headers.insert(FORWARDED_PROTO, HeaderValue::from_static("https"));
        assert_eq!(base_url(None, &headers), "https://127.0.0.1:5000");
    }

    #[test]
    fn test_page_url_from_host() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("ravintola.local:5000"));
        assert_eq!(
            page_url(None, &headers, "/menu"),
            "http://ravintola.local:5000/menu"
        );
        assert_eq!(
            page_url(None, &headers, "/reservation"),
            "http://ravintola.local:5000/reservation"
        );
    }

    #[test]
    fn test_page_url_from_configured_base() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("10.0.0.5:5000"));
        assert_eq!(
            page_url(Some("https://ravintola.fi/"), &headers, "/order"),
            "https://ravintola.fi/order"
        );
    }

    #[test]
    fn test_base_url_without_host() {
        assert_eq!(base_url(None, &HeaderMap::new()), "http://localhost");
    }
}
