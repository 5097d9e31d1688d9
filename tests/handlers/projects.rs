//! Project endpoint tests

use crate::common::{create_project, unique_name, TestApp};
use serde_json::json;

async fn list_projects(app: &TestApp) -> Vec<serde_json::Value> {
    let response = app.client
        .get(&app.url("/api/projects"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    body["data"].as_array().unwrap().clone()
}

#[tokio::test]
async fn test_list_projects_empty() {
    let app = TestApp::new().await;

    assert!(list_projects(&app).await.is_empty());
}

#[tokio::test]
async fn test_create_project_success() {
    let app = TestApp::new().await;

    let response = app.client
        .post(&app.url("/api/projects"))
        .json(&json!({
            "title": "Portfolio",
            "description": "This site",
            "technologies": ["Rust", "MongoDB"],
            "githubLink": "https://github.com/example/portfolio"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["title"], "Portfolio");
    assert_eq!(body["data"]["technologies"], json!(["Rust", "MongoDB"]));
    assert_eq!(body["data"]["githubLink"], "https://github.com/example/portfolio");
    assert_eq!(body["data"]["featured"], false);
    assert_eq!(body["data"]["_id"].as_str().unwrap().len(), 24);
}

#[tokio::test]
async fn test_create_project_missing_title_returns_400() {
    let app = TestApp::new().await;

    let response = app.client
        .post(&app.url("/api/projects"))
        .json(&json!({ "description": "No title" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["fields"]["title"].is_string());

    assert!(list_projects(&app).await.is_empty());
}

#[tokio::test]
async fn test_list_projects_returns_created() {
    let app = TestApp::new().await;
    let title = unique_name("project");
    let id = create_project(&app, &title).await;

    let projects = list_projects(&app).await;

    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0]["_id"], id.as_str());
    assert_eq!(projects[0]["title"], title.as_str());
}

#[tokio::test]
async fn test_update_project() {
    let app = TestApp::new().await;
    let id = create_project(&app, "Old title").await;

    let response = app.client
        .put(&app.url(&format!("/api/projects/{}", id)))
        .json(&json!({
            "title": "New title",
            "featured": true,
            "ownerId": "someone-else"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["title"], "New title");
    assert_eq!(body["data"]["description"], "A project used in tests");
    assert_eq!(body["data"]["featured"], true);
    assert!(body["data"].get("ownerId").is_none());
}

#[tokio::test]
async fn test_update_project_null_clears_link() {
    let app = TestApp::new().await;
    let response = app.client
        .post(&app.url("/api/projects"))
        .json(&json!({
            "title": "Portfolio",
            "description": "This site",
            "githubLink": "https://github.com/example/portfolio",
            "liveLink": "https://portfolio.example.com"
        }))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = response.json().await.unwrap();
    let id = body["data"]["_id"].as_str().unwrap().to_string();

    let response = app.client
        .put(&app.url(&format!("/api/projects/{}", id)))
        .json(&json!({ "githubLink": null }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["data"].get("githubLink").is_none());
    assert_eq!(body["data"]["liveLink"], "https://portfolio.example.com");
}

#[tokio::test]
async fn test_update_project_blank_title_returns_400() {
    let app = TestApp::new().await;
    let id = create_project(&app, "Keep me").await;

    let response = app.client
        .put(&app.url(&format!("/api/projects/{}", id)))
        .json(&json!({ "title": "" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    assert_eq!(list_projects(&app).await[0]["title"], "Keep me");
}

#[tokio::test]
async fn test_update_project_not_found() {
    let app = TestApp::new().await;

    let response = app.client
        .put(&app.url("/api/projects/653f1c2e9b1e8a0012345678"))
        .json(&json!({ "title": "Ghost" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Project not found");
}

#[tokio::test]
async fn test_delete_project() {
    let app = TestApp::new().await;
    let id = create_project(&app, "Short lived").await;
    let url = app.url(&format!("/api/projects/{}", id));

    let response = app.client.delete(&url).send().await.unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Project has been deleted");
    assert!(list_projects(&app).await.is_empty());

    let again = app.client.delete(&url).send().await.unwrap();
    assert_eq!(again.status(), 404);
}
