//! SQLite FabricRepository implementation.

use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use super::helpers::{
    active_categories, build_catalog_filter, delete_by_id, map_sqlx, toggle_flag,
};
use crate::db::utils::{current_timestamp, generate_entity_id, or_generate};
use crate::db::{CatalogQuery, DbError, DbResult, Fabric, FabricRepository, Validate};

/// SQLx-backed fabric repository.
pub struct SqliteFabricRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

const COLUMNS: &str = "id, name, description, composition, color, category, price_per_meter, \
                       image_url, in_stock, featured, active, display_order, created_at, updated_at";

fn row_to_fabric(row: &SqliteRow) -> Fabric {
    Fabric {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        composition: row.get("composition"),
        color: row.get("color"),
        category: row.get("category"),
        price_per_meter: row.get("price_per_meter"),
        image_url: row.get("image_url"),
        in_stock: row.get("in_stock"),
        featured: row.get("featured"),
        active: row.get("active"),
        order: row.get("display_order"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl<'a> FabricRepository for SqliteFabricRepository<'a> {
    async fn create(&self, fabric: &Fabric) -> DbResult<Fabric> {
        fabric.validate()?;

        let now = current_timestamp();
        let mut stored = fabric.clone();
        stored.id = or_generate(&fabric.id, generate_entity_id);
        stored.name = fabric.name.trim().to_string();
        stored.category = fabric.category.trim().to_string();
        stored.created_at = or_generate(&fabric.created_at, || now.clone());
        stored.updated_at = or_generate(&fabric.updated_at, || now.clone());

        sqlx::query(
            "INSERT INTO fabric (id, name, description, composition, color, category, price_per_meter,
                                 image_url, in_stock, featured, active, display_order, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&stored.id)
        .bind(&stored.name)
        .bind(&stored.description)
        .bind(&stored.composition)
        .bind(&stored.color)
        .bind(&stored.category)
        .bind(stored.price_per_meter)
        .bind(&stored.image_url)
        .bind(stored.in_stock)
        .bind(stored.featured)
        .bind(stored.active)
        .bind(stored.order)
        .bind(&stored.created_at)
        .bind(&stored.updated_at)
        .execute(self.pool)
        .await
        .map_err(|e| map_sqlx("Fabric", e))?;

        Ok(stored)
    }

    async fn get(&self, id: &str) -> DbResult<Fabric> {
        let sql = format!("SELECT {COLUMNS} FROM fabric WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| map_sqlx("Fabric", e))?;

        row.map(|r| row_to_fabric(&r))
            .ok_or_else(|| DbError::not_found("Fabric", id))
    }

    async fn list(&self, query: &CatalogQuery) -> DbResult<Vec<Fabric>> {
        let filter = build_catalog_filter(query, true, true);
        let sql = format!(
            "SELECT {COLUMNS} FROM fabric {} ORDER BY display_order, name {}",
            filter.where_clause, filter.limit_clause
        );

        let mut q = sqlx::query(&sql);
        for value in &filter.bind_values {
            q = q.bind(value);
        }

        let rows = q
            .fetch_all(self.pool)
            .await
            .map_err(|e| map_sqlx("Fabric", e))?;

        Ok(rows.iter().map(row_to_fabric).collect())
    }

    async fn update(&self, fabric: &Fabric) -> DbResult<Fabric> {
        fabric.validate()?;

        let mut stored = fabric.clone();
        stored.name = fabric.name.trim().to_string();
        stored.category = fabric.category.trim().to_string();
        stored.updated_at = current_timestamp();

        let result = sqlx::query(
            "UPDATE fabric
             SET name = ?, description = ?, composition = ?, color = ?, category = ?,
                 price_per_meter = ?, image_url = ?, in_stock = ?, featured = ?, active = ?,
                 display_order = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&stored.name)
        .bind(&stored.description)
        .bind(&stored.composition)
        .bind(&stored.color)
        .bind(&stored.category)
        .bind(stored.price_per_meter)
        .bind(&stored.image_url)
        .bind(stored.in_stock)
        .bind(stored.featured)
        .bind(stored.active)
        .bind(stored.order)
        .bind(&stored.updated_at)
        .bind(&stored.id)
        .execute(self.pool)
        .await
        .map_err(|e| map_sqlx("Fabric", e))?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Fabric", &fabric.id));
        }

        Ok(stored)
    }

    async fn delete(&self, id: &str) -> DbResult<()> {
        delete_by_id(self.pool, "fabric", "Fabric", id).await
    }

    async fn toggle_active(&self, id: &str) -> DbResult<Fabric> {
        toggle_flag(self.pool, "fabric", "active", "Fabric", id, &current_timestamp()).await?;
        self.get(id).await
    }

    async fn toggle_featured(&self, id: &str) -> DbResult<Fabric> {
        toggle_flag(self.pool, "fabric", "featured", "Fabric", id, &current_timestamp()).await?;
        self.get(id).await
    }

    async fn categories(&self) -> DbResult<Vec<String>> {
        active_categories(self.pool, "fabric").await
    }
}
