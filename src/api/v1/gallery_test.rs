//! Integration tests for gallery endpoints, including reorder.

use std::collections::HashSet;

use axum::http::StatusCode;
use serde_json::{Value, json};

use super::test_helpers::*;
use crate::api::notifier::{Entity, UpdateMessage};

async fn create_item(app: &axum::Router, cookie: &str, title: &str, order: i64) -> Value {
    let response = send(
        app,
        request(
            "POST",
            "/api/v1/admin/gallery",
            Some(cookie),
            Some(json!({
                "title": title,
                "image_url": "/uploads/coats/coat.jpg",
                "category": "coats",
                "tags": ["зима"],
                "order": order
            })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response).await
}

async fn list_items(app: &axum::Router, cookie: &str) -> Vec<Value> {
    let response = send(
        app,
        request("GET", "/api/v1/admin/gallery?per_page=100", Some(cookie), None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response).await["items"].as_array().unwrap().clone()
}

#[tokio::test(flavor = "multi_thread")]
async fn create_item_with_defaults() {
    let (app, state) = test_app().await;
    let cookie = login(&app, &state).await;

    let item = create_item(&app, &cookie, "Пальто", 0).await;
    assert_eq!(item["active"], true);
    assert_eq!(item["featured"], false);
    assert_eq!(item["tags"], json!(["зима"]));
}

#[tokio::test(flavor = "multi_thread")]
async fn invalid_image_url_is_rejected() {
    let (app, state) = test_app().await;
    let cookie = login(&app, &state).await;

    let response = send(
        &app,
        request(
            "POST",
            "/api/v1/admin/gallery",
            Some(&cookie),
            Some(json!({
                "title": "Пальто",
                "image_url": "javascript:alert(1)",
                "category": "coats"
            })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread")]
async fn toggle_active_twice_restores_state() {
    let (app, state) = test_app().await;
    let cookie = login(&app, &state).await;
    let item = create_item(&app, &cookie, "Пальто", 0).await;
    let uri = format!(
        "/api/v1/admin/gallery/{}/toggle-active",
        item["id"].as_str().unwrap()
    );

    let response = send(&app, request("POST", &uri, Some(&cookie), None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["active"], false);

    let response = send(&app, request("POST", &uri, Some(&cookie), None)).await;
    assert_eq!(json_body(response).await["active"], true);
}

#[tokio::test(flavor = "multi_thread")]
async fn toggle_featured_on_missing_item_is_not_found() {
    let (app, state) = test_app().await;
    let cookie = login(&app, &state).await;

    let response = send(
        &app,
        request(
            "POST",
            "/api/v1/admin/gallery/deadbeef/toggle-featured",
            Some(&cookie),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn reorder_changes_only_order() {
    let (app, state) = test_app().await;
    let cookie = login(&app, &state).await;

    let a = create_item(&app, &cookie, "A", 0).await;
    let b = create_item(&app, &cookie, "B", 1).await;
    let c = create_item(&app, &cookie, "C", 2).await;
    let before = list_items(&app, &cookie).await;

    let response = send(
        &app,
        request(
            "PUT",
            "/api/v1/admin/gallery/reorder",
            Some(&cookie),
            Some(json!({"items": [
                {"id": c["id"], "order": 0},
                {"id": a["id"], "order": 1},
                {"id": b["id"], "order": 2}
            ]})),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["success"], true);

    let after = list_items(&app, &cookie).await;
    let titles: Vec<&str> = after.iter().map(|i| i["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["C", "A", "B"]);

    let ids = |items: &[Value]| -> HashSet<String> {
        items
            .iter()
            .map(|i| i["id"].as_str().unwrap().to_string())
            .collect()
    };
    assert_eq!(ids(&before), ids(&after));

    for item in &after {
        let original = before.iter().find(|b| b["id"] == item["id"]).unwrap();
        assert_eq!(item["title"], original["title"]);
        assert_eq!(item["image_url"], original["image_url"]);
        assert_eq!(item["category"], original["category"]);
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn reorder_with_unknown_id_changes_nothing() {
    let (app, state) = test_app().await;
    let cookie = login(&app, &state).await;

    let a = create_item(&app, &cookie, "A", 0).await;
    create_item(&app, &cookie, "B", 1).await;

    let response = send(
        &app,
        request(
            "PUT",
            "/api/v1/admin/gallery/reorder",
            Some(&cookie),
            Some(json!({"items": [
                {"id": a["id"], "order": 5},
                {"id": "deadbeef", "order": 0}
            ]})),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let items = list_items(&app, &cookie).await;
    let first = items.iter().find(|i| i["id"] == a["id"]).unwrap();
    assert_eq!(first["order"], 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn reorder_broadcasts_and_revalidates() {
    let (app, state) = test_app().await;
    let cookie = login(&app, &state).await;
    let a = create_item(&app, &cookie, "A", 0).await;

    state
        .pages()
        .insert("/gallery".to_string(), "<html>old</html>".to_string());
    state
        .pages()
        .insert("/fabrics".to_string(), "<html>fabrics</html>".to_string());
    let mut rx = state.notifier().subscribe();

    let response = send(
        &app,
        request(
            "PUT",
            "/api/v1/admin/gallery/reorder",
            Some(&cookie),
            Some(json!({"items": [{"id": a["id"], "order": 3}]})),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(
        rx.recv().await.unwrap(),
        UpdateMessage::Reordered {
            entity: Entity::Gallery
        }
    );
    assert_eq!(
        rx.recv().await.unwrap(),
        UpdateMessage::Revalidated {
            paths: vec!["/".to_string(), "/gallery".to_string()]
        }
    );
    assert!(state.pages().get("/gallery").is_none());
    assert!(state.pages().get("/fabrics").is_some());
}

#[tokio::test(flavor = "multi_thread")]
async fn update_and_delete_item() {
    let (app, state) = test_app().await;
    let cookie = login(&app, &state).await;
    let item = create_item(&app, &cookie, "Пальто", 0).await;
    let uri = format!("/api/v1/admin/gallery/{}", item["id"].as_str().unwrap());

    let response = send(
        &app,
        request(
            "PUT",
            &uri,
            Some(&cookie),
            Some(json!({
                "title": "Пальто из кашемира",
                "image_url": "https://cdn.example.com/coat.jpg",
                "category": "coats",
                "featured": true
            })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["title"], "Пальто из кашемира");
    assert_eq!(body["featured"], true);
    assert_eq!(body["tags"], json!([]));

    let response = send(&app, request("DELETE", &uri, Some(&cookie), None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, request("GET", &uri, Some(&cookie), None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
