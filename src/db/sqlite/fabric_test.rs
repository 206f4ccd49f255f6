//! Tests for SqliteFabricRepository.

use crate::db::{CatalogQuery, Database, DbError, Fabric, FabricRepository, SqliteDatabase};

async fn setup_db() -> SqliteDatabase {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("Migration should succeed");
    db
}

fn make_fabric(id: &str, name: &str, category: &str, order: i64) -> Fabric {
    Fabric {
        id: id.to_string(),
        name: name.to_string(),
        description: None,
        composition: Some("100% шерсть".to_string()),
        color: None,
        category: category.to_string(),
        price_per_meter: Some(4500),
        image_url: Some("/uploads/wool.jpg".to_string()),
        in_stock: true,
        featured: false,
        active: true,
        order,
        created_at: String::new(),
        updated_at: String::new(),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn fabric_create_and_get() {
    let db = setup_db().await;
    let fabrics = db.fabrics();

    let created = fabrics
        .create(&make_fabric("fab00001", "Кашемир", "wool", 0))
        .await
        .expect("Create should succeed");

    let retrieved = fabrics.get("fab00001").await.expect("Get should succeed");
    assert_eq!(retrieved, created);
    assert_eq!(retrieved.price_per_meter, Some(4500));
}

#[tokio::test(flavor = "multi_thread")]
async fn negative_price_is_rejected() {
    let db = setup_db().await;
    let mut fabric = make_fabric("fab00002", "Лён", "linen", 0);
    fabric.price_per_meter = Some(-1);

    let err = db.fabrics().create(&fabric).await.unwrap_err();
    assert!(matches!(err, DbError::Validation { .. }));
}

#[tokio::test(flavor = "multi_thread")]
async fn fabric_list_orders_and_filters_by_category() {
    let db = setup_db().await;
    let fabrics = db.fabrics();

    fabrics
        .create(&make_fabric("fab00003", "Твид", "wool", 2))
        .await
        .unwrap();
    fabrics
        .create(&make_fabric("fab00004", "Кашемир", "wool", 1))
        .await
        .unwrap();
    fabrics
        .create(&make_fabric("fab00005", "Лён", "linen", 0))
        .await
        .unwrap();

    let all = fabrics.list(&CatalogQuery::default()).await.unwrap();
    let names: Vec<&str> = all.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["Лён", "Кашемир", "Твид"]);

    let wool = fabrics
        .list(&CatalogQuery {
            category: Some("wool".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(wool.len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn toggle_active_twice_restores_state() {
    let db = setup_db().await;
    let fabrics = db.fabrics();
    fabrics
        .create(&make_fabric("fab00006", "Шёлк", "silk", 0))
        .await
        .unwrap();

    let once = fabrics.toggle_active("fab00006").await.unwrap();
    assert!(!once.active);
    let twice = fabrics.toggle_active("fab00006").await.unwrap();
    assert!(twice.active);

    let featured = fabrics.toggle_featured("fab00006").await.unwrap();
    assert!(featured.featured);
}

#[tokio::test(flavor = "multi_thread")]
async fn public_listing_and_categories_skip_inactive() {
    let db = setup_db().await;
    let fabrics = db.fabrics();

    fabrics
        .create(&make_fabric("fab00007", "Шёлк", "silk", 0))
        .await
        .unwrap();
    let mut hidden = make_fabric("fab00008", "Хлопок", "cotton", 0);
    hidden.active = false;
    fabrics.create(&hidden).await.unwrap();

    let public = fabrics.list(&CatalogQuery::public()).await.unwrap();
    assert_eq!(public.len(), 1);
    assert_eq!(fabrics.categories().await.unwrap(), vec!["silk".to_string()]);
}

#[tokio::test(flavor = "multi_thread")]
async fn fabric_missing_returns_not_found() {
    let db = setup_db().await;
    let fabrics = db.fabrics();

    assert!(matches!(
        fabrics.get("nonexist").await,
        Err(DbError::NotFound { .. })
    ));
    assert!(matches!(
        fabrics.toggle_active("nonexist").await,
        Err(DbError::NotFound { .. })
    ));
    assert!(matches!(
        fabrics.delete("nonexist").await,
        Err(DbError::NotFound { .. })
    ));
}
