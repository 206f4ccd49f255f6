//! Tests for SqliteSessionRepository.

use crate::db::{Database, Session, SessionRepository, SqliteDatabase, User, UserRepository};

async fn setup_db() -> SqliteDatabase {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("Migration should succeed");
    db
}

fn make_user(id: &str, email: &str) -> User {
    User {
        id: id.to_string(),
        email: email.to_string(),
        name: "Админ".to_string(),
        password_hash: "$argon2id$placeholder".to_string(),
        created_at: String::new(),
        updated_at: String::new(),
    }
}

fn make_session(token_hash: &str, user_id: &str, expires_at: &str) -> Session {
    Session {
        token_hash: token_hash.to_string(),
        user_id: user_id.to_string(),
        created_at: "2025-01-01 00:00:00".to_string(),
        expires_at: expires_at.to_string(),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn session_resolves_user_until_expiry() {
    let db = setup_db().await;
    db.users()
        .create(&make_user("usr00004", "a@example.com"))
        .await
        .unwrap();
    let sessions = db.sessions();

    sessions
        .create(&make_session("hash0001", "usr00004", "2025-01-08 00:00:00"))
        .await
        .unwrap();

    let user = sessions
        .find_user("hash0001", "2025-01-02 00:00:00")
        .await
        .unwrap();
    assert_eq!(user.map(|u| u.id), Some("usr00004".to_string()));

    let expired = sessions
        .find_user("hash0001", "2025-01-09 00:00:00")
        .await
        .unwrap();
    assert!(expired.is_none());

    assert!(
        sessions
            .find_user("unknown1", "2025-01-02 00:00:00")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn session_delete_is_idempotent() {
    let db = setup_db().await;
    db.users()
        .create(&make_user("usr00005", "a@example.com"))
        .await
        .unwrap();
    let sessions = db.sessions();
    sessions
        .create(&make_session("hash0002", "usr00005", "2099-01-01 00:00:00"))
        .await
        .unwrap();

    sessions.delete("hash0002").await.unwrap();
    sessions.delete("hash0002").await.unwrap();
    assert!(
        sessions
            .find_user("hash0002", "2025-01-01 00:00:00")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_expired_and_delete_for_user() {
    let db = setup_db().await;
    db.users()
        .create(&make_user("usr00006", "a@example.com"))
        .await
        .unwrap();
    let sessions = db.sessions();

    sessions
        .create(&make_session("old00001", "usr00006", "2020-01-01 00:00:00"))
        .await
        .unwrap();
    sessions
        .create(&make_session("keep0001", "usr00006", "2099-01-01 00:00:00"))
        .await
        .unwrap();
    sessions
        .create(&make_session("drop0001", "usr00006", "2099-01-01 00:00:00"))
        .await
        .unwrap();

    assert_eq!(sessions.delete_expired("2025-01-01 00:00:00").await.unwrap(), 1);
    assert_eq!(
        sessions
            .delete_for_user("usr00006", Some("keep0001"))
            .await
            .unwrap(),
        1
    );

    let now = "2025-01-01 00:00:00";
    assert!(sessions.find_user("keep0001", now).await.unwrap().is_some());
    assert!(sessions.find_user("drop0001", now).await.unwrap().is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn deleting_user_removes_sessions() {
    let db = setup_db().await;
    db.users()
        .create(&make_user("usr00007", "a@example.com"))
        .await
        .unwrap();
    db.sessions()
        .create(&make_session("hash0003", "usr00007", "2099-01-01 00:00:00"))
        .await
        .unwrap();

    db.users().delete("usr00007").await.unwrap();

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM session")
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}
