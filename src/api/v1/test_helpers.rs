//! Shared fixtures for router tests.

use axum::{
    Router,
    body::Body,
    http::{Request, header},
    response::Response,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use crate::api::notifier::ChangeNotifier;
use crate::api::{AppState, routes};
use crate::auth::{SessionConfig, hash_password};
use crate::db::{Database, SqliteDatabase, User, UserRepository};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "correct horse";

/// Router plus a handle on its state, over a fresh in-memory database.
pub async fn test_app() -> (Router, AppState<SqliteDatabase>) {
    let db = SqliteDatabase::in_memory().await.unwrap();
    db.migrate().await.unwrap();
    let state = AppState::new(db, ChangeNotifier::new(), SessionConfig::default());
    (routes::create_router(state.clone(), None), state)
}

/// Helper to parse JSON response body
pub async fn json_body(response: Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

pub async fn text_body(response: Response) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(body.to_vec()).unwrap()
}

/// Build a request, optionally with a JSON body and session cookie.
pub fn request(method: &str, uri: &str, cookie: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn create_admin(state: &AppState<SqliteDatabase>) -> User {
    state
        .db()
        .users()
        .create(&User {
            id: String::new(),
            email: ADMIN_EMAIL.to_string(),
            name: "Администратор".to_string(),
            password_hash: hash_password(ADMIN_PASSWORD).unwrap(),
            created_at: String::new(),
            updated_at: String::new(),
        })
        .await
        .unwrap()
}

/// Create the admin account, log in and return the `name=value` cookie pair.
pub async fn login(app: &Router, state: &AppState<SqliteDatabase>) -> String {
    create_admin(state).await;
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/v1/auth/login",
            None,
            Some(serde_json::json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD})),
        ))
        .await
        .unwrap();

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login sets a cookie")
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

/// Send a request and return the response.
pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}
