//! Tests for SqliteServiceRepository.

use crate::db::{CatalogQuery, Database, DbError, Service, ServiceRepository, SqliteDatabase};

async fn setup_db() -> SqliteDatabase {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("Migration should succeed");
    db
}

fn make_service(id: &str, title: &str, slug: &str, order: i64) -> Service {
    Service {
        id: id.to_string(),
        title: title.to_string(),
        slug: slug.to_string(),
        description: "Индивидуальный пошив по меркам".to_string(),
        price_from: Some(15000),
        duration: Some("2-3 недели".to_string()),
        features: vec!["Две примерки".to_string(), "Подбор ткани".to_string()],
        image_url: None,
        featured: false,
        active: true,
        order,
        created_at: String::new(),
        updated_at: String::new(),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn service_create_get_and_get_by_slug() {
    let db = setup_db().await;
    let services = db.services();

    let created = services
        .create(&make_service("svc00001", "Пошив пальто", "coat-tailoring", 0))
        .await
        .expect("Create should succeed");

    assert_eq!(services.get("svc00001").await.unwrap(), created);
    let by_slug = services.get_by_slug("coat-tailoring").await.unwrap();
    assert_eq!(by_slug.id, "svc00001");
    assert_eq!(by_slug.features.len(), 2);

    assert!(matches!(
        services.get_by_slug("unknown").await,
        Err(DbError::NotFound { .. })
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn duplicate_slug_is_reported_as_already_exists() {
    let db = setup_db().await;
    let services = db.services();

    services
        .create(&make_service("svc00002", "Пошив", "tailoring", 0))
        .await
        .unwrap();
    let err = services
        .create(&make_service("svc00003", "Пошив 2", "tailoring", 1))
        .await
        .unwrap_err();

    match err {
        DbError::AlreadyExists { id, .. } => assert_eq!(id, "tailoring"),
        other => panic!("Expected AlreadyExists, got {:?}", other),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn invalid_slug_is_rejected() {
    let db = setup_db().await;
    let err = db
        .services()
        .create(&make_service("svc00004", "Ремонт", "Ремонт одежды", 0))
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::Validation { .. }));
}

#[tokio::test(flavor = "multi_thread")]
async fn service_list_filters_featured_and_orders() {
    let db = setup_db().await;
    let services = db.services();

    services
        .create(&make_service("svc00005", "Ремонт", "repair", 1))
        .await
        .unwrap();
    services
        .create(&make_service("svc00006", "Пошив", "tailoring", 0))
        .await
        .unwrap();
    services.toggle_featured("svc00005").await.unwrap();

    let all = services.list(&CatalogQuery::default()).await.unwrap();
    let ids: Vec<&str> = all.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["svc00006", "svc00005"]);

    let featured = services.list(&CatalogQuery::featured(None)).await.unwrap();
    assert_eq!(featured.len(), 1);
    assert_eq!(featured[0].id, "svc00005");
}

#[tokio::test(flavor = "multi_thread")]
async fn service_update_toggle_and_delete() {
    let db = setup_db().await;
    let services = db.services();

    let mut service = services
        .create(&make_service("svc00007", "Пошив", "tailoring", 0))
        .await
        .unwrap();
    service.price_from = Some(20000);
    services.update(&service).await.unwrap();
    assert_eq!(
        services.get("svc00007").await.unwrap().price_from,
        Some(20000)
    );

    assert!(!services.toggle_active("svc00007").await.unwrap().active);
    assert!(services.toggle_active("svc00007").await.unwrap().active);

    services.delete("svc00007").await.unwrap();
    assert!(matches!(
        services.delete("svc00007").await,
        Err(DbError::NotFound { .. })
    ));
}
