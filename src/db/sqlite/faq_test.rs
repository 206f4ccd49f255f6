//! Tests for SqliteFaqRepository.

use crate::db::{CatalogQuery, Database, DbError, Faq, FaqRepository, SqliteDatabase};

async fn setup_db() -> SqliteDatabase {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("Migration should succeed");
    db
}

fn make_faq(id: &str, question: &str, order: i64) -> Faq {
    Faq {
        id: id.to_string(),
        question: question.to_string(),
        answer: "**Да**, конечно.".to_string(),
        category: None,
        active: true,
        order,
        created_at: String::new(),
        updated_at: String::new(),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn faq_list_follows_order() {
    let db = setup_db().await;
    let faqs = db.faqs();

    faqs.create(&make_faq("faq00002", "Второй?", 2)).await.unwrap();
    faqs.create(&make_faq("faq00001", "Первый?", 1)).await.unwrap();

    let all = faqs.list(&CatalogQuery::default()).await.unwrap();
    let ids: Vec<&str> = all.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, vec!["faq00001", "faq00002"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn faq_without_answer_is_rejected() {
    let db = setup_db().await;
    let mut faq = make_faq("faq00003", "Сроки?", 0);
    faq.answer = String::new();

    let err = db.faqs().create(&faq).await.unwrap_err();
    assert!(matches!(err, DbError::Validation { .. }));
}

#[tokio::test(flavor = "multi_thread")]
async fn inactive_faq_is_hidden_from_public_listing() {
    let db = setup_db().await;
    let faqs = db.faqs();
    faqs.create(&make_faq("faq00004", "Сроки?", 0)).await.unwrap();

    let toggled = faqs.toggle_active("faq00004").await.unwrap();
    assert!(!toggled.active);
    assert!(faqs.list(&CatalogQuery::public()).await.unwrap().is_empty());

    let restored = faqs.toggle_active("faq00004").await.unwrap();
    assert!(restored.active);
    assert_eq!(faqs.list(&CatalogQuery::public()).await.unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn faq_update_and_delete() {
    let db = setup_db().await;
    let faqs = db.faqs();

    let mut faq = faqs.create(&make_faq("faq00005", "Цена?", 0)).await.unwrap();
    faq.answer = "От 5000 ₽".to_string();
    faqs.update(&faq).await.unwrap();
    assert_eq!(faqs.get("faq00005").await.unwrap().answer, "От 5000 ₽");

    faqs.delete("faq00005").await.unwrap();
    assert!(matches!(
        faqs.delete("faq00005").await,
        Err(DbError::NotFound { .. })
    ));

    let mut ghost = make_faq("faq00006", "Призрак?", 0);
    ghost.answer = "нет".to_string();
    assert!(matches!(
        faqs.update(&ghost).await,
        Err(DbError::NotFound { .. })
    ));
}
