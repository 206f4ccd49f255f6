//! Integration tests for the calendar endpoints.

use axum::http::StatusCode;
use serde_json::{Value, json};

use super::test_helpers::*;

async fn create_event(app: &axum::Router, cookie: &str, title: &str, start_at: &str) -> Value {
    let response = send(
        app,
        request(
            "POST",
            "/api/v1/admin/events",
            Some(cookie),
            Some(json!({
                "title": title,
                "event_type": "fitting",
                "start_at": start_at
            })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response).await
}

#[tokio::test(flavor = "multi_thread")]
async fn create_event_keeps_time_and_defaults_status() {
    let (app, state) = test_app().await;
    let cookie = login(&app, &state).await;

    let body = create_event(&app, &cookie, "Примерка", "2025-03-10T14:30:00").await;
    assert_eq!(body["start_at"], "2025-03-10T14:30:00");
    assert_eq!(body["event_type"], "fitting");
    assert_eq!(body["status"], "scheduled");
    assert_eq!(body["all_day"], false);
}

#[tokio::test(flavor = "multi_thread")]
async fn event_ending_before_start_is_rejected() {
    let (app, state) = test_app().await;
    let cookie = login(&app, &state).await;

    let response = send(
        &app,
        request(
            "POST",
            "/api/v1/admin/events",
            Some(&cookie),
            Some(json!({
                "title": "Примерка",
                "start_at": "2025-03-10T14:00:00",
                "end_at": "2025-03-10T13:00:00"
            })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["success"], false);
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_event_type_is_rejected() {
    let (app, state) = test_app().await;
    let cookie = login(&app, &state).await;

    let response = send(
        &app,
        request(
            "POST",
            "/api/v1/admin/events",
            Some(&cookie),
            Some(json!({
                "title": "Примерка",
                "event_type": "party",
                "start_at": "2025-03-10T14:00:00"
            })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_contact_reference_is_a_bad_request() {
    let (app, state) = test_app().await;
    let cookie = login(&app, &state).await;

    let response = send(
        &app,
        request(
            "POST",
            "/api/v1/admin/events",
            Some(&cookie),
            Some(json!({
                "title": "Примерка",
                "start_at": "2025-03-10T14:00:00",
                "contact_id": "deadbeef"
            })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "Связанная запись не найдена");
}

#[tokio::test(flavor = "multi_thread")]
async fn list_events_filters_by_date_range() {
    let (app, state) = test_app().await;
    let cookie = login(&app, &state).await;

    create_event(&app, &cookie, "Февраль", "2025-02-27T10:00:00").await;
    create_event(&app, &cookie, "Март", "2025-03-10T10:00:00").await;
    create_event(&app, &cookie, "Конец марта", "2025-03-31T18:00:00").await;
    create_event(&app, &cookie, "Апрель", "2025-04-01T09:00:00").await;

    let response = send(
        &app,
        request(
            "GET",
            "/api/v1/admin/events?from=2025-03-01&to=2025-03-31",
            Some(&cookie),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let titles: Vec<&str> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Март", "Конец марта"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn calendar_has_42_days_starting_monday() {
    let (app, state) = test_app().await;
    let cookie = login(&app, &state).await;

    create_event(&app, &cookie, "Примерка", "2025-03-10T14:00:00").await;
    create_event(&app, &cookie, "Доставка", "2025-03-10T09:00:00").await;
    // Visible in the leading days of the March grid
    create_event(&app, &cookie, "Консультация", "2025-02-25T12:00:00").await;

    let response = send(
        &app,
        request(
            "GET",
            "/api/v1/admin/events/calendar?year=2025&month=3",
            Some(&cookie),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["title"], "Март");
    assert_eq!(body["prev"], json!({"year": 2025, "month": 2}));
    assert_eq!(body["next"], json!({"year": 2025, "month": 4}));

    let days = body["days"].as_array().unwrap();
    assert_eq!(days.len(), 42);
    // 2025-03-01 is a Saturday
    assert_eq!(days[0]["date"], "2025-02-24");
    assert_eq!(days[0]["in_month"], false);
    assert_eq!(days[5]["date"], "2025-03-01");
    assert_eq!(days[5]["in_month"], true);

    assert_eq!(days[1]["events"][0]["title"], "Консультация");

    let tenth = days.iter().find(|d| d["date"] == "2025-03-10").unwrap();
    let titles: Vec<&str> = tenth["events"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Доставка", "Примерка"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn calendar_rejects_invalid_month() {
    let (app, state) = test_app().await;
    let cookie = login(&app, &state).await;

    let response = send(
        &app,
        request(
            "GET",
            "/api/v1/admin/events/calendar?year=2025&month=13",
            Some(&cookie),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "Некорректный месяц");
}

#[tokio::test(flavor = "multi_thread")]
async fn update_and_delete_event() {
    let (app, state) = test_app().await;
    let cookie = login(&app, &state).await;
    let event = create_event(&app, &cookie, "Примерка", "2025-03-10T14:00:00").await;
    let uri = format!("/api/v1/admin/events/{}", event["id"].as_str().unwrap());

    let response = send(
        &app,
        request(
            "PUT",
            &uri,
            Some(&cookie),
            Some(json!({
                "title": "Вторая примерка",
                "status": "completed",
                "start_at": "2025-03-12T11:00:00"
            })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["title"], "Вторая примерка");
    assert_eq!(body["status"], "completed");
    assert_eq!(body["event_type"], "fitting");

    let response = send(&app, request("DELETE", &uri, Some(&cookie), None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, request("DELETE", &uri, Some(&cookie), None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
