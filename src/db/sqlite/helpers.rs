//! Shared helper functions for SQLite repositories.

use sqlx::SqlitePool;

use crate::db::{CatalogQuery, DbError, DbResult};

/// Convert a sqlx error, surfacing unique-constraint failures as
/// [`DbError::AlreadyExists`].
pub fn map_sqlx(entity_type: &str, e: sqlx::Error) -> DbError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return DbError::AlreadyExists {
                entity_type: entity_type.to_string(),
                id: db_err.message().to_string(),
            };
        }
        if db_err.is_foreign_key_violation() || db_err.is_check_violation() {
            return DbError::Constraint {
                message: db_err.message().to_string(),
            };
        }
    }
    DbError::Database {
        message: e.to_string(),
    }
}

/// Serialize a string list for a JSON text column.
pub fn to_json_list(values: &[String]) -> DbResult<String> {
    serde_json::to_string(values).map_err(|e| DbError::Database {
        message: format!("Failed to serialize list: {}", e),
    })
}

/// Parse a JSON text column back into a string list.
pub fn from_json_list(json: &str) -> DbResult<Vec<String>> {
    serde_json::from_str(json).map_err(|e| DbError::Database {
        message: format!("Failed to parse list JSON: {}", e),
    })
}

/// Parse a text enum column.
pub fn parse_column<T: std::str::FromStr<Err = String>>(value: &str) -> DbResult<T> {
    value
        .parse::<T>()
        .map_err(|message| DbError::Database { message })
}

/// WHERE clause and bind values for a catalog query.
///
/// `has_category` / `has_featured` tell whether the table carries those
/// columns; filters on missing columns are ignored.
pub struct CatalogFilter {
    pub where_clause: String,
    pub bind_values: Vec<String>,
    pub limit_clause: String,
}

pub fn build_catalog_filter(
    query: &CatalogQuery,
    has_category: bool,
    has_featured: bool,
) -> CatalogFilter {
    let mut conditions = Vec::new();
    let mut bind_values = Vec::new();

    if query.active_only {
        conditions.push("active = 1".to_string());
    }
    if has_featured && query.featured_only {
        conditions.push("featured = 1".to_string());
    }
    if has_category
        && let Some(category) = query.category.as_deref().filter(|c| !c.is_empty())
    {
        conditions.push("category = ?".to_string());
        bind_values.push(category.to_string());
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    let limit_clause = query
        .limit
        .map(|l| format!("LIMIT {}", l))
        .unwrap_or_default();

    CatalogFilter {
        where_clause,
        bind_values,
        limit_clause,
    }
}

/// Flip a boolean column and bump `updated_at`.
///
/// `table` and `column` are compile-time constants from the repositories,
/// never user input.
pub async fn toggle_flag(
    pool: &SqlitePool,
    table: &str,
    column: &str,
    entity_type: &str,
    id: &str,
    updated_at: &str,
) -> DbResult<()> {
    let sql = format!(
        "UPDATE {table} SET {column} = NOT {column}, updated_at = ? WHERE id = ?"
    );
    let result = sqlx::query(&sql)
        .bind(updated_at)
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| map_sqlx(entity_type, e))?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found(entity_type, id));
    }
    Ok(())
}

/// Delete a row by id, failing with NotFound when nothing was removed.
pub async fn delete_by_id(
    pool: &SqlitePool,
    table: &str,
    entity_type: &str,
    id: &str,
) -> DbResult<()> {
    let sql = format!("DELETE FROM {table} WHERE id = ?");
    let result = sqlx::query(&sql)
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| map_sqlx(entity_type, e))?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found(entity_type, id));
    }
    Ok(())
}

/// Distinct non-empty categories of active rows.
pub async fn active_categories(pool: &SqlitePool, table: &str) -> DbResult<Vec<String>> {
    let sql = format!(
        "SELECT DISTINCT category FROM {table} WHERE active = 1 AND category != '' ORDER BY category"
    );
    sqlx::query_scalar(&sql)
        .fetch_all(pool)
        .await
        .map_err(|e| DbError::Database {
            message: e.to_string(),
        })
}
