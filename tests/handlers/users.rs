//! User account endpoint tests

use crate::common::{seed_user, TestApp};
use mongodb::bson::{doc, oid::ObjectId};
use portfolio::database::{DocumentStore, USERS};
use serde_json::json;

async fn get_user(app: &TestApp, id: &str) -> reqwest::Response {
    app.client
        .get(&app.url(&format!("/api/users/{}", id)))
        .send()
        .await
        .unwrap()
}

// ============================================================================
// GET /api/users/{id}
// ============================================================================

#[tokio::test]
async fn test_get_user_hides_password() {
    let app = TestApp::new().await;
    let id = seed_user(&app, "ada").await;

    let response = get_user(&app, &id).await;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["_id"], id.as_str());
    assert_eq!(body["data"]["username"], "ada");
    assert_eq!(body["data"]["email"], "ada@example.com");
    assert!(body["data"].get("password").is_none(), "password must never be returned");
}

#[tokio::test]
async fn test_get_user_with_unexpected_document_shape() {
    let app = TestApp::new().await;
    let stored = app
        .memory_store()
        .insert(
            USERS,
            doc! { "email": "grace@example.com", "password": "s3cret", "isAdmin": true },
        )
        .await
        .unwrap();
    let id = stored.get_object_id("_id").unwrap().to_hex();

    let response = get_user(&app, &id).await;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["_id"], id.as_str());
    assert_eq!(body["data"]["email"], "grace@example.com");
    assert_eq!(body["data"]["isAdmin"], true);
    assert!(body["data"]["createdAt"].is_string());
    assert!(body["data"].get("password").is_none());
}

#[tokio::test]
async fn test_get_user_not_found() {
    let app = TestApp::new().await;

    for id in [ObjectId::new().to_hex(), "42".to_string()] {
        let response = get_user(&app, &id).await;

        assert_eq!(response.status(), 404);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "User not found");
    }
}

// ============================================================================
// PUT /api/users/{id}
// ============================================================================

#[tokio::test]
async fn test_update_user_own_account() {
    let app = TestApp::new().await;
    let id = seed_user(&app, "ada").await;

    let response = app.client
        .put(&app.url(&format!("/api/users/{}", id)))
        .json(&json!({ "userId": id, "username": "ada_lovelace" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Account has been updated");

    let body: serde_json::Value = get_user(&app, &id).await.json().await.unwrap();
    assert_eq!(body["data"]["username"], "ada_lovelace");
    assert_eq!(body["data"]["email"], "ada@example.com");
}

#[tokio::test]
async fn test_update_user_does_not_store_caller_id() {
    let app = TestApp::new().await;
    let id = seed_user(&app, "ada").await;

    app.client
        .put(&app.url(&format!("/api/users/{}", id)))
        .json(&json!({ "userId": id, "email": "ada@lovelace.dev", "isAdmin": true }))
        .send()
        .await
        .unwrap();

    let object_id = ObjectId::parse_str(&id).unwrap();
    let stored = app.memory_store().find_by_id(USERS, &object_id).await.unwrap().unwrap();
    assert_eq!(stored.get_str("email").unwrap(), "ada@lovelace.dev");
    assert!(!stored.contains_key("userId"));
    assert!(!stored.contains_key("isAdmin"));
}

#[tokio::test]
async fn test_update_other_account_forbidden() {
    let app = TestApp::new().await;
    let id = seed_user(&app, "ada").await;
    let other = seed_user(&app, "grace").await;

    let response = app.client
        .put(&app.url(&format!("/api/users/{}", id)))
        .json(&json!({ "userId": other, "username": "hijacked" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 403);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "FORBIDDEN");
    assert_eq!(body["error"], "You can update only your account!");

    let body: serde_json::Value = get_user(&app, &id).await.json().await.unwrap();
    assert_eq!(body["data"]["username"], "ada", "record must be unchanged");
}

#[tokio::test]
async fn test_update_user_without_caller_id_forbidden() {
    let app = TestApp::new().await;
    let id = seed_user(&app, "ada").await;

    let response = app.client
        .put(&app.url(&format!("/api/users/{}", id)))
        .json(&json!({ "username": "anonymous" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 403);
}

#[tokio::test]
async fn test_update_user_mismatch_checked_before_lookup() {
    let app = TestApp::new().await;

    let response = app.client
        .put(&app.url("/api/users/42"))
        .json(&json!({ "userId": "43" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 403);
}

#[tokio::test]
async fn test_update_user_unknown_id_returns_404() {
    let app = TestApp::new().await;
    let id = ObjectId::new().to_hex();

    let response = app.client
        .put(&app.url(&format!("/api/users/{}", id)))
        .json(&json!({ "userId": id, "username": "ghost" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_update_user_wrong_field_type_returns_400() {
    let app = TestApp::new().await;
    let id = seed_user(&app, "ada").await;

    let response = app.client
        .put(&app.url(&format!("/api/users/{}", id)))
        .json(&json!({ "userId": id, "username": 42 }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["code"], "VALIDATION_ERROR");
}
