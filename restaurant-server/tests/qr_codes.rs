mod common;

use common::{TestApp, body_bytes, body_text};
use http::{Request, StatusCode, header};
use restaurant_server::services::qr::encode_png;

const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

#[tokio::test]
async fn test_qr_images_are_png() {
    let app = TestApp::new();

    for uri in ["/qr/menu", "/qr/reservation", "/qr/order"] {
        let request = Request::get(uri)
            .header(header::HOST, "ravintola.local:5000")
            .body(axum::body::Body::empty())
            .unwrap();
        let response = app.send(request).await;
        assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");

        let bytes = body_bytes(response).await;
        assert!(bytes.starts_with(PNG_SIGNATURE));
        let img = image::load_from_memory(&bytes).unwrap();
        assert!(img.width() >= 256);
    }
}

#[tokio::test]
async fn test_qr_page_links_images() {
    let app = TestApp::new();
    let page = body_text(app.get("/qr?lang=en", None).await).await;
    assert!(page.contains("src=\"/qr/menu\""));
    assert!(page.contains("src=\"/qr/reservation\""));
    assert!(page.contains("src=\"/qr/order\""));
}

async fn fetch_qr(app: &TestApp, uri: &str, host: &str) -> Vec<u8> {
    let request = Request::get(uri)
        .header(header::HOST, host)
        .body(axum::body::Body::empty())
        .unwrap();
    body_bytes(app.send(request).await).await
}

#[tokio::test]
async fn test_qr_encodes_page_url_from_host() {
    let app = TestApp::new();

    let png = fetch_qr(&app, "/qr/menu", "ravintola.local:5000").await;
    assert_eq!(png, encode_png("http://ravintola.local:5000/menu").unwrap());

    let png = fetch_qr(&app, "/qr/order", "ravintola.local:5000").await;
    assert_eq!(png, encode_png("http://ravintola.local:5000/order").unwrap());
}

#[tokio::test]
async fn test_qr_prefers_public_base_url() {
    let app = TestApp::with_config(|config| {
        config.public_base_url = Some("https://ravintola.fi".into());
    });

    let png = fetch_qr(&app, "/qr/reservation", "10.0.0.5:5000").await;
    assert_eq!(png, encode_png("https://ravintola.fi/reservation").unwrap());
    assert_ne!(png, encode_png("http://10.0.0.5:5000/reservation").unwrap());
}
