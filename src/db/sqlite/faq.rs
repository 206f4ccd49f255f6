//! SQLite FaqRepository implementation.

use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use super::helpers::{build_catalog_filter, delete_by_id, map_sqlx, toggle_flag};
use crate::db::utils::{current_timestamp, generate_entity_id, or_generate};
use crate::db::{CatalogQuery, DbError, DbResult, Faq, FaqRepository, Validate};

/// SQLx-backed FAQ repository.
pub struct SqliteFaqRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

const COLUMNS: &str =
    "id, question, answer, category, active, display_order, created_at, updated_at";

fn row_to_faq(row: &SqliteRow) -> Faq {
    Faq {
        id: row.get("id"),
        question: row.get("question"),
        answer: row.get("answer"),
        category: row.get("category"),
        active: row.get("active"),
        order: row.get("display_order"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl<'a> FaqRepository for SqliteFaqRepository<'a> {
    async fn create(&self, faq: &Faq) -> DbResult<Faq> {
        faq.validate()?;

        let now = current_timestamp();
        let mut stored = faq.clone();
        stored.id = or_generate(&faq.id, generate_entity_id);
        stored.question = faq.question.trim().to_string();
        stored.created_at = or_generate(&faq.created_at, || now.clone());
        stored.updated_at = or_generate(&faq.updated_at, || now.clone());

        sqlx::query(
            "INSERT INTO faq (id, question, answer, category, active, display_order, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&stored.id)
        .bind(&stored.question)
        .bind(&stored.answer)
        .bind(&stored.category)
        .bind(stored.active)
        .bind(stored.order)
        .bind(&stored.created_at)
        .bind(&stored.updated_at)
        .execute(self.pool)
        .await
        .map_err(|e| map_sqlx("Faq", e))?;

        Ok(stored)
    }

    async fn get(&self, id: &str) -> DbResult<Faq> {
        let sql = format!("SELECT {COLUMNS} FROM faq WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| map_sqlx("Faq", e))?;

        row.map(|r| row_to_faq(&r))
            .ok_or_else(|| DbError::not_found("Faq", id))
    }

    async fn list(&self, query: &CatalogQuery) -> DbResult<Vec<Faq>> {
        let filter = build_catalog_filter(query, true, false);
        let sql = format!(
            "SELECT {COLUMNS} FROM faq {} ORDER BY display_order, created_at {}",
            filter.where_clause, filter.limit_clause
        );

        let mut q = sqlx::query(&sql);
        for value in &filter.bind_values {
            q = q.bind(value);
        }

        let rows = q
            .fetch_all(self.pool)
            .await
            .map_err(|e| map_sqlx("Faq", e))?;

        Ok(rows.iter().map(row_to_faq).collect())
    }

    async fn update(&self, faq: &Faq) -> DbResult<Faq> {
        faq.validate()?;

        let mut stored = faq.clone();
        stored.question = faq.question.trim().to_string();
        stored.updated_at = current_timestamp();

        let result = sqlx::query(
            "UPDATE faq
             SET question = ?, answer = ?, category = ?, active = ?, display_order = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&stored.question)
        .bind(&stored.answer)
        .bind(&stored.category)
        .bind(stored.active)
        .bind(stored.order)
        .bind(&stored.updated_at)
        .bind(&stored.id)
        .execute(self.pool)
        .await
        .map_err(|e| map_sqlx("Faq", e))?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Faq", &faq.id));
        }

        Ok(stored)
    }

    async fn delete(&self, id: &str) -> DbResult<()> {
        delete_by_id(self.pool, "faq", "Faq", id).await
    }

    async fn toggle_active(&self, id: &str) -> DbResult<Faq> {
        toggle_flag(self.pool, "faq", "active", "Faq", id, &current_timestamp()).await?;
        self.get(id).await
    }
}
