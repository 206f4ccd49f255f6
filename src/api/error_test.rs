use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use serde_json::Value;

use super::error::{ApiError, MSG_INTERNAL, MSG_NOT_FOUND};
use crate::auth::AuthError;
use crate::db::DbError;

async fn body_of(err: ApiError) -> (StatusCode, Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[test]
fn db_errors_map_to_statuses() {
    let cases = [
        (DbError::not_found("Fabric", "x"), StatusCode::NOT_FOUND),
        (
            DbError::AlreadyExists {
                entity_type: "Service".into(),
                id: "slug".into(),
            },
            StatusCode::CONFLICT,
        ),
        (DbError::validation("Укажите email"), StatusCode::BAD_REQUEST),
        (
            DbError::Constraint {
                message: "FOREIGN KEY constraint failed".into(),
            },
            StatusCode::BAD_REQUEST,
        ),
        (
            DbError::Database {
                message: "disk I/O error".into(),
            },
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (db_err, expected) in cases {
        assert_eq!(ApiError::from(db_err).status(), expected);
    }
}

#[tokio::test]
async fn envelope_has_success_false_and_message() {
    let (status, body) = body_of(ApiError::NotFound).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], MSG_NOT_FOUND);
}

#[tokio::test]
async fn validation_message_is_passed_through() {
    let (_, body) = body_of(DbError::validation("Укажите email").into()).await;
    assert_eq!(body["error"], "Укажите email");
}

#[tokio::test]
async fn internal_details_are_not_leaked() {
    let err: ApiError = DbError::Database {
        message: "SELECT * FROM user exploded".into(),
    }
    .into();
    let (status, body) = body_of(err).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], MSG_INTERNAL);
}

#[test]
fn weak_password_is_a_validation_error() {
    let err: ApiError = AuthError::WeakPassword { min: 8 }.into();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert!(err.message().contains('8'));
}
