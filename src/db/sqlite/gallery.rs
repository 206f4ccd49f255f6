//! SQLite GalleryRepository implementation.

use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use super::helpers::{
    active_categories, build_catalog_filter, delete_by_id, from_json_list, map_sqlx,
    to_json_list, toggle_flag,
};
use crate::db::utils::{current_timestamp, generate_entity_id, or_generate};
use crate::db::{CatalogQuery, DbError, DbResult, GalleryItem, GalleryRepository, Validate};

/// SQLx-backed gallery repository.
pub struct SqliteGalleryRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

const COLUMNS: &str = "id, title, description, image_url, category, tags, fabric_ids, featured, \
                       active, display_order, created_at, updated_at";

fn row_to_item(row: &SqliteRow) -> DbResult<GalleryItem> {
    let tags: String = row.get("tags");
    let fabric_ids: String = row.get("fabric_ids");
    Ok(GalleryItem {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        image_url: row.get("image_url"),
        category: row.get("category"),
        tags: from_json_list(&tags)?,
        fabric_ids: from_json_list(&fabric_ids)?,
        featured: row.get("featured"),
        active: row.get("active"),
        order: row.get("display_order"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

impl<'a> GalleryRepository for SqliteGalleryRepository<'a> {
    async fn create(&self, item: &GalleryItem) -> DbResult<GalleryItem> {
        item.validate()?;

        let now = current_timestamp();
        let mut stored = item.clone();
        stored.id = or_generate(&item.id, generate_entity_id);
        stored.title = item.title.trim().to_string();
        stored.category = item.category.trim().to_string();
        stored.created_at = or_generate(&item.created_at, || now.clone());
        stored.updated_at = or_generate(&item.updated_at, || now.clone());

        sqlx::query(
            "INSERT INTO gallery_item (id, title, description, image_url, category, tags, fabric_ids,
                                       featured, active, display_order, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&stored.id)
        .bind(&stored.title)
        .bind(&stored.description)
        .bind(&stored.image_url)
        .bind(&stored.category)
        .bind(to_json_list(&stored.tags)?)
        .bind(to_json_list(&stored.fabric_ids)?)
        .bind(stored.featured)
        .bind(stored.active)
        .bind(stored.order)
        .bind(&stored.created_at)
        .bind(&stored.updated_at)
        .execute(self.pool)
        .await
        .map_err(|e| map_sqlx("GalleryItem", e))?;

        Ok(stored)
    }

    async fn get(&self, id: &str) -> DbResult<GalleryItem> {
        let sql = format!("SELECT {COLUMNS} FROM gallery_item WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| map_sqlx("GalleryItem", e))?;

        match row {
            Some(row) => row_to_item(&row),
            None => Err(DbError::not_found("GalleryItem", id)),
        }
    }

    async fn list(&self, query: &CatalogQuery) -> DbResult<Vec<GalleryItem>> {
        let filter = build_catalog_filter(query, true, true);
        let sql = format!(
            "SELECT {COLUMNS} FROM gallery_item {} ORDER BY display_order, created_at DESC {}",
            filter.where_clause, filter.limit_clause
        );

        let mut q = sqlx::query(&sql);
        for value in &filter.bind_values {
            q = q.bind(value);
        }

        let rows = q
            .fetch_all(self.pool)
            .await
            .map_err(|e| map_sqlx("GalleryItem", e))?;

        rows.iter().map(row_to_item).collect()
    }

    async fn update(&self, item: &GalleryItem) -> DbResult<GalleryItem> {
        item.validate()?;

        let mut stored = item.clone();
        stored.title = item.title.trim().to_string();
        stored.category = item.category.trim().to_string();
        stored.updated_at = current_timestamp();

        let result = sqlx::query(
            "UPDATE gallery_item
             SET title = ?, description = ?, image_url = ?, category = ?, tags = ?, fabric_ids = ?,
                 featured = ?, active = ?, display_order = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&stored.title)
        .bind(&stored.description)
        .bind(&stored.image_url)
        .bind(&stored.category)
        .bind(to_json_list(&stored.tags)?)
        .bind(to_json_list(&stored.fabric_ids)?)
        .bind(stored.featured)
        .bind(stored.active)
        .bind(stored.order)
        .bind(&stored.updated_at)
        .bind(&stored.id)
        .execute(self.pool)
        .await
        .map_err(|e| map_sqlx("GalleryItem", e))?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("GalleryItem", &item.id));
        }

        Ok(stored)
    }

    async fn delete(&self, id: &str) -> DbResult<()> {
        delete_by_id(self.pool, "gallery_item", "GalleryItem", id).await
    }

    async fn toggle_active(&self, id: &str) -> DbResult<GalleryItem> {
        toggle_flag(
            self.pool,
            "gallery_item",
            "active",
            "GalleryItem",
            id,
            &current_timestamp(),
        )
        .await?;
        self.get(id).await
    }

    async fn toggle_featured(&self, id: &str) -> DbResult<GalleryItem> {
        toggle_flag(
            self.pool,
            "gallery_item",
            "featured",
            "GalleryItem",
            id,
            &current_timestamp(),
        )
        .await?;
        self.get(id).await
    }

    async fn reorder(&self, orders: &[(String, i64)]) -> DbResult<()> {
        if orders.iter().any(|(_, order)| *order < 0) {
            return Err(DbError::validation("Порядок не может быть отрицательным"));
        }

        // All or nothing: an unknown id rolls back every change in the batch
        let mut tx = self.pool.begin().await.map_err(|e| DbError::Database {
            message: format!("Failed to begin transaction: {}", e),
        })?;

        let now = current_timestamp();
        for (id, order) in orders {
            let result = sqlx::query(
                "UPDATE gallery_item SET display_order = ?, updated_at = ? WHERE id = ?",
            )
            .bind(order)
            .bind(&now)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx("GalleryItem", e))?;

            if result.rows_affected() == 0 {
                return Err(DbError::not_found("GalleryItem", id));
            }
        }

        tx.commit().await.map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        Ok(())
    }

    async fn categories(&self) -> DbResult<Vec<String>> {
        active_categories(self.pool, "gallery_item").await
    }
}
