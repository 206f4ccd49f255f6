//! SQLite TestimonialRepository implementation.

use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use super::helpers::{build_catalog_filter, delete_by_id, map_sqlx, toggle_flag};
use crate::db::utils::{current_timestamp, generate_entity_id, or_generate};
use crate::db::{CatalogQuery, DbError, DbResult, Testimonial, TestimonialRepository, Validate};

/// SQLx-backed testimonial repository.
pub struct SqliteTestimonialRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

const COLUMNS: &str = "id, client_name, content, rating, service_id, image_url, featured, active, \
                       display_order, created_at, updated_at";

fn row_to_testimonial(row: &SqliteRow) -> Testimonial {
    Testimonial {
        id: row.get("id"),
        client_name: row.get("client_name"),
        content: row.get("content"),
        rating: row.get("rating"),
        service_id: row.get("service_id"),
        image_url: row.get("image_url"),
        featured: row.get("featured"),
        active: row.get("active"),
        order: row.get("display_order"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl<'a> TestimonialRepository for SqliteTestimonialRepository<'a> {
    async fn create(&self, testimonial: &Testimonial) -> DbResult<Testimonial> {
        testimonial.validate()?;

        let now = current_timestamp();
        let mut stored = testimonial.clone();
        stored.id = or_generate(&testimonial.id, generate_entity_id);
        stored.client_name = testimonial.client_name.trim().to_string();
        stored.created_at = or_generate(&testimonial.created_at, || now.clone());
        stored.updated_at = or_generate(&testimonial.updated_at, || now.clone());

        sqlx::query(
            "INSERT INTO testimonial (id, client_name, content, rating, service_id, image_url, featured,
                                      active, display_order, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&stored.id)
        .bind(&stored.client_name)
        .bind(&stored.content)
        .bind(stored.rating)
        .bind(&stored.service_id)
        .bind(&stored.image_url)
        .bind(stored.featured)
        .bind(stored.active)
        .bind(stored.order)
        .bind(&stored.created_at)
        .bind(&stored.updated_at)
        .execute(self.pool)
        .await
        .map_err(|e| map_sqlx("Testimonial", e))?;

        Ok(stored)
    }

    async fn get(&self, id: &str) -> DbResult<Testimonial> {
        let sql = format!("SELECT {COLUMNS} FROM testimonial WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| map_sqlx("Testimonial", e))?;

        row.map(|r| row_to_testimonial(&r))
            .ok_or_else(|| DbError::not_found("Testimonial", id))
    }

    async fn list(&self, query: &CatalogQuery) -> DbResult<Vec<Testimonial>> {
        let filter = build_catalog_filter(query, false, true);
        let sql = format!(
            "SELECT {COLUMNS} FROM testimonial {} ORDER BY display_order, created_at DESC {}",
            filter.where_clause, filter.limit_clause
        );

        let mut q = sqlx::query(&sql);
        for value in &filter.bind_values {
            q = q.bind(value);
        }

        let rows = q
            .fetch_all(self.pool)
            .await
            .map_err(|e| map_sqlx("Testimonial", e))?;

        Ok(rows.iter().map(row_to_testimonial).collect())
    }

    async fn update(&self, testimonial: &Testimonial) -> DbResult<Testimonial> {
        testimonial.validate()?;

        let mut stored = testimonial.clone();
        stored.client_name = testimonial.client_name.trim().to_string();
        stored.updated_at = current_timestamp();

        let result = sqlx::query(
            "UPDATE testimonial
             SET client_name = ?, content = ?, rating = ?, service_id = ?, image_url = ?,
                 featured = ?, active = ?, display_order = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&stored.client_name)
        .bind(&stored.content)
        .bind(stored.rating)
        .bind(&stored.service_id)
        .bind(&stored.image_url)
        .bind(stored.featured)
        .bind(stored.active)
        .bind(stored.order)
        .bind(&stored.updated_at)
        .bind(&stored.id)
        .execute(self.pool)
        .await
        .map_err(|e| map_sqlx("Testimonial", e))?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Testimonial", &testimonial.id));
        }

        Ok(stored)
    }

    async fn delete(&self, id: &str) -> DbResult<()> {
        delete_by_id(self.pool, "testimonial", "Testimonial", id).await
    }

    async fn toggle_active(&self, id: &str) -> DbResult<Testimonial> {
        toggle_flag(
            self.pool,
            "testimonial",
            "active",
            "Testimonial",
            id,
            &current_timestamp(),
        )
        .await?;
        self.get(id).await
    }

    async fn toggle_featured(&self, id: &str) -> DbResult<Testimonial> {
        toggle_flag(
            self.pool,
            "testimonial",
            "featured",
            "Testimonial",
            id,
            &current_timestamp(),
        )
        .await?;
        self.get(id).await
    }
}
