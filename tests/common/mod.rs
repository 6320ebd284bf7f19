#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use pokereview::{app, AppState};
use serde_json::Value;
use tower::util::ServiceExt; // for `oneshot`

pub fn test_app() -> Router {
    app(AppState::in_memory(), 1024 * 1024)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("response body is not UTF-8")
    }
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> TestResponse {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(b) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec();
    TestResponse { status, body }
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    send(app, "GET", uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> TestResponse {
    send(app, "POST", uri, Some(&body.to_string())).await
}

pub async fn put(app: &Router, uri: &str, body: Value) -> TestResponse {
    send(app, "PUT", uri, Some(&body.to_string())).await
}

pub async fn delete(app: &Router, uri: &str) -> TestResponse {
    send(app, "DELETE", uri, None).await
}

/// Find the id of the single item named `name` in a list endpoint.
pub async fn id_of(app: &Router, list_uri: &str, field: &str, name: &str) -> i64 {
    let list = get(app, list_uri).await.json();
    list.as_array()
        .unwrap()
        .iter()
        .find(|item| item[field] == name)
        .and_then(|item| item["id"].as_i64())
        .unwrap_or_else(|| panic!("{} not found in {}", name, list_uri))
}

/// Seed a country, an owner and a category. Returns (country_id, owner_id, category_id).
pub async fn seed_links(app: &Router) -> (i64, i64, i64) {
    let res = post(app, "/api/country", serde_json::json!({ "name": "Kanto" })).await;
    assert_eq!(res.status, StatusCode::OK);
    let country_id = id_of(app, "/api/country", "name", "Kanto").await;

    let res = post(
        app,
        &format!("/api/owner?countryId={}", country_id),
        serde_json::json!({ "name": "Ash" }),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);
    let owner_id = id_of(app, "/api/owner", "name", "Ash").await;

    let res = post(app, "/api/category", serde_json::json!({ "name": "Electric" })).await;
    assert_eq!(res.status, StatusCode::OK);
    let category_id = id_of(app, "/api/category", "name", "Electric").await;

    (country_id, owner_id, category_id)
}
