//! SQLite ServiceRepository implementation.

use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use super::helpers::{
    build_catalog_filter, delete_by_id, from_json_list, map_sqlx, to_json_list, toggle_flag,
};
use crate::db::utils::{current_timestamp, generate_entity_id, or_generate};
use crate::db::{CatalogQuery, DbError, DbResult, Service, ServiceRepository, Validate};

/// SQLx-backed service repository.
pub struct SqliteServiceRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

const COLUMNS: &str = "id, title, slug, description, price_from, duration, features, image_url, \
                       featured, active, display_order, created_at, updated_at";

fn row_to_service(row: &SqliteRow) -> DbResult<Service> {
    let features: String = row.get("features");
    Ok(Service {
        id: row.get("id"),
        title: row.get("title"),
        slug: row.get("slug"),
        description: row.get("description"),
        price_from: row.get("price_from"),
        duration: row.get("duration"),
        features: from_json_list(&features)?,
        image_url: row.get("image_url"),
        featured: row.get("featured"),
        active: row.get("active"),
        order: row.get("display_order"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

impl SqliteServiceRepository<'_> {
    async fn fetch_one_by(&self, column: &str, value: &str) -> DbResult<Option<Service>> {
        let sql = format!("SELECT {COLUMNS} FROM service WHERE {column} = ?");
        let row = sqlx::query(&sql)
            .bind(value)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| map_sqlx("Service", e))?;

        row.map(|r| row_to_service(&r)).transpose()
    }
}

impl<'a> ServiceRepository for SqliteServiceRepository<'a> {
    async fn create(&self, service: &Service) -> DbResult<Service> {
        service.validate()?;

        let now = current_timestamp();
        let mut stored = service.clone();
        stored.id = or_generate(&service.id, generate_entity_id);
        stored.title = service.title.trim().to_string();
        stored.created_at = or_generate(&service.created_at, || now.clone());
        stored.updated_at = or_generate(&service.updated_at, || now.clone());

        sqlx::query(
            "INSERT INTO service (id, title, slug, description, price_from, duration, features, image_url,
                                  featured, active, display_order, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&stored.id)
        .bind(&stored.title)
        .bind(&stored.slug)
        .bind(&stored.description)
        .bind(stored.price_from)
        .bind(&stored.duration)
        .bind(to_json_list(&stored.features)?)
        .bind(&stored.image_url)
        .bind(stored.featured)
        .bind(stored.active)
        .bind(stored.order)
        .bind(&stored.created_at)
        .bind(&stored.updated_at)
        .execute(self.pool)
        .await
        .map_err(|e| match map_sqlx("Service", e) {
            DbError::AlreadyExists { entity_type, .. } => DbError::AlreadyExists {
                entity_type,
                id: stored.slug.clone(),
            },
            other => other,
        })?;

        Ok(stored)
    }

    async fn get(&self, id: &str) -> DbResult<Service> {
        self.fetch_one_by("id", id)
            .await?
            .ok_or_else(|| DbError::not_found("Service", id))
    }

    async fn get_by_slug(&self, slug: &str) -> DbResult<Service> {
        self.fetch_one_by("slug", slug)
            .await?
            .ok_or_else(|| DbError::not_found("Service", slug))
    }

    async fn list(&self, query: &CatalogQuery) -> DbResult<Vec<Service>> {
        let filter = build_catalog_filter(query, false, true);
        let sql = format!(
            "SELECT {COLUMNS} FROM service {} ORDER BY display_order, title {}",
            filter.where_clause, filter.limit_clause
        );

        let mut q = sqlx::query(&sql);
        for value in &filter.bind_values {
            q = q.bind(value);
        }

        let rows = q
            .fetch_all(self.pool)
            .await
            .map_err(|e| map_sqlx("Service", e))?;

        rows.iter().map(row_to_service).collect()
    }

    async fn update(&self, service: &Service) -> DbResult<Service> {
        service.validate()?;

        let mut stored = service.clone();
        stored.title = service.title.trim().to_string();
        stored.updated_at = current_timestamp();

        let result = sqlx::query(
            "UPDATE service
             SET title = ?, slug = ?, description = ?, price_from = ?, duration = ?, features = ?,
                 image_url = ?, featured = ?, active = ?, display_order = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&stored.title)
        .bind(&stored.slug)
        .bind(&stored.description)
        .bind(stored.price_from)
        .bind(&stored.duration)
        .bind(to_json_list(&stored.features)?)
        .bind(&stored.image_url)
        .bind(stored.featured)
        .bind(stored.active)
        .bind(stored.order)
        .bind(&stored.updated_at)
        .bind(&stored.id)
        .execute(self.pool)
        .await
        .map_err(|e| map_sqlx("Service", e))?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Service", &service.id));
        }

        Ok(stored)
    }

    async fn delete(&self, id: &str) -> DbResult<()> {
        delete_by_id(self.pool, "service", "Service", id).await
    }

    async fn toggle_active(&self, id: &str) -> DbResult<Service> {
        toggle_flag(self.pool, "service", "active", "Service", id, &current_timestamp()).await?;
        self.get(id).await
    }

    async fn toggle_featured(&self, id: &str) -> DbResult<Service> {
        toggle_flag(self.pool, "service", "featured", "Service", id, &current_timestamp()).await?;
        self.get(id).await
    }
}
