//! Tests for SqliteSettingRepository.

use crate::db::{Database, DbError, SettingRepository, SqliteDatabase};

async fn setup_db() -> SqliteDatabase {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("Migration should succeed");
    db
}

fn pair(key: &str, value: &str) -> (String, String) {
    (key.to_string(), value.to_string())
}

#[tokio::test(flavor = "multi_thread")]
async fn settings_are_listed_by_key() {
    let db = setup_db().await;
    let settings = db.settings().list().await.unwrap();

    let keys: Vec<&str> = settings.iter().map(|s| s.key.as_str()).collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
    assert!(keys.contains(&"hero_title"));
}

#[tokio::test(flavor = "multi_thread")]
async fn upsert_many_inserts_and_overwrites() {
    let db = setup_db().await;
    let settings = db.settings();

    let stored = settings
        .upsert_many(&[
            pair("site_name", "Ателье Мастер"),
            pair("instagram", "@atelier"),
        ])
        .await
        .unwrap();
    assert_eq!(stored.len(), 2);

    assert_eq!(settings.get("site_name").await.unwrap().value, "Ателье Мастер");
    assert_eq!(settings.get("instagram").await.unwrap().value, "@atelier");
}

#[tokio::test(flavor = "multi_thread")]
async fn upsert_many_with_blank_key_writes_nothing() {
    let db = setup_db().await;
    let settings = db.settings();

    let err = settings
        .upsert_many(&[pair("site_name", "Другое"), pair("  ", "x")])
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::Validation { .. }));
    assert_eq!(settings.get("site_name").await.unwrap().value, "Ателье");
}

#[tokio::test(flavor = "multi_thread")]
async fn setting_delete_and_missing_key() {
    let db = setup_db().await;
    let settings = db.settings();

    settings.delete("about_text").await.unwrap();
    assert!(matches!(
        settings.get("about_text").await,
        Err(DbError::NotFound { .. })
    ));
    assert!(matches!(
        settings.delete("about_text").await,
        Err(DbError::NotFound { .. })
    ));
}
