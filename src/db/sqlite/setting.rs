//! SQLite SettingRepository implementation.

use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use super::helpers::map_sqlx;
use crate::db::utils::current_timestamp;
use crate::db::{DbError, DbResult, Setting, SettingRepository, Validate};

/// SQLx-backed settings repository.
pub struct SqliteSettingRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

fn row_to_setting(row: &SqliteRow) -> Setting {
    Setting {
        key: row.get("key"),
        value: row.get("value"),
        updated_at: row.get("updated_at"),
    }
}

impl<'a> SettingRepository for SqliteSettingRepository<'a> {
    async fn list(&self) -> DbResult<Vec<Setting>> {
        let rows = sqlx::query("SELECT key, value, updated_at FROM setting ORDER BY key")
            .fetch_all(self.pool)
            .await
            .map_err(|e| map_sqlx("Setting", e))?;

        Ok(rows.iter().map(row_to_setting).collect())
    }

    async fn get(&self, key: &str) -> DbResult<Setting> {
        let row = sqlx::query("SELECT key, value, updated_at FROM setting WHERE key = ?")
            .bind(key)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| map_sqlx("Setting", e))?;

        row.map(|r| row_to_setting(&r))
            .ok_or_else(|| DbError::not_found("Setting", key))
    }

    async fn upsert_many(&self, values: &[(String, String)]) -> DbResult<Vec<Setting>> {
        let now = current_timestamp();
        let settings: Vec<Setting> = values
            .iter()
            .map(|(key, value)| Setting {
                key: key.trim().to_string(),
                value: value.clone(),
                updated_at: now.clone(),
            })
            .collect();

        for setting in &settings {
            setting.validate()?;
        }

        let mut tx = self.pool.begin().await.map_err(|e| DbError::Database {
            message: format!("Failed to begin transaction: {}", e),
        })?;

        for setting in &settings {
            sqlx::query(
                "INSERT INTO setting (key, value, updated_at) VALUES (?, ?, ?)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            )
            .bind(&setting.key)
            .bind(&setting.value)
            .bind(&setting.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx("Setting", e))?;
        }

        tx.commit().await.map_err(|e| DbError::Database {
            message: format!("Failed to commit transaction: {}", e),
        })?;

        Ok(settings)
    }

    async fn delete(&self, key: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM setting WHERE key = ?")
            .bind(key)
            .execute(self.pool)
            .await
            .map_err(|e| map_sqlx("Setting", e))?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Setting", key));
        }
        Ok(())
    }
}
