//! CORS policy tests

use crate::common::TestApp;

const ALLOWED_ORIGIN: &str = "http://localhost:3000";

#[tokio::test]
async fn test_allowed_origin_is_echoed_with_credentials() {
    let app = TestApp::new().await;

    let response = app.client
        .get(&app.url("/api/projects"))
        .header("origin", ALLOWED_ORIGIN)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let headers = response.headers();
    assert_eq!(headers.get("access-control-allow-origin").unwrap(), ALLOWED_ORIGIN);
    assert_eq!(headers.get("access-control-allow-credentials").unwrap(), "true");
}

#[tokio::test]
async fn test_unknown_origin_gets_no_cors_headers() {
    let app = TestApp::new().await;

    let response = app.client
        .get(&app.url("/api/projects"))
        .header("origin", "https://evil.example.com")
        .send()
        .await
        .unwrap();

    assert!(response.headers().get("access-control-allow-origin").is_none());
}

#[tokio::test]
async fn test_preflight_allows_put() {
    let app = TestApp::new().await;

    let response = app.client
        .request(reqwest::Method::OPTIONS, &app.url("/api/contact/653f1c2e9b1e8a0012345678"))
        .header("origin", ALLOWED_ORIGIN)
        .header("access-control-request-method", "PUT")
        .header("access-control-request-headers", "content-type")
        .send()
        .await
        .unwrap();

    assert!(response.status().is_success());
    let methods = response
        .headers()
        .get("access-control-allow-methods")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(methods.contains("PUT"));
    assert!(methods.contains("DELETE"));
}
