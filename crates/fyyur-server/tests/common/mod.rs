// Shared test utilities for HTTP integration tests
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use fyyur_db::{AppState, DatabaseConfig};
use fyyur_migration::{Migrator, MigratorTrait};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// A router backed by a freshly migrated in-memory database.
pub async fn test_app() -> Router {
    let db = fyyur_db::connect(&DatabaseConfig::sqlite_memory())
        .await
        .expect("connect to in-memory sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    fyyur_server::router(Arc::new(AppState { db }))
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("request handled");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, body)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_search(app: &Router, uri: &str, term: &str) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!(
            "search_term={}",
            urlencoding::encode(term)
        )))
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::delete(uri).body(Body::empty()).unwrap()).await
}

pub fn venue_body(name: &str, city: &str, state: &str) -> Value {
    serde_json::json!({
        "name": name,
        "city": city,
        "state": state,
        "address": "335 Delancey Street",
        "phone": "914-003-1132",
        "genres": ["Jazz", "Folk"],
        "image_link": "https://img.example.com/venue.jpg",
        "seeking_talent": true,
        "seeking_description": "We are on the lookout for a local artist"
    })
}

pub fn artist_body(name: &str) -> Value {
    serde_json::json!({
        "name": name,
        "city": "San Francisco",
        "state": "CA",
        "phone": "326-123-5000",
        "genres": ["Rock n Roll"],
        "image_link": "https://img.example.com/artist.jpg"
    })
}

pub async fn create_id(app: &Router, uri: &str, body: Value) -> i64 {
    let (status, created) = post_json(app, uri, body).await;
    assert_eq!(status, StatusCode::CREATED, "unexpected response: {created}");
    created["id"].as_i64().expect("created id")
}
