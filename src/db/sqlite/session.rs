//! SQLite SessionRepository implementation.

use sqlx::{Row, SqlitePool};

use super::helpers::map_sqlx;
use crate::db::{DbResult, Session, SessionRepository, User};

/// SQLx-backed session repository.
pub struct SqliteSessionRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

impl<'a> SessionRepository for SqliteSessionRepository<'a> {
    async fn create(&self, session: &Session) -> DbResult<()> {
        sqlx::query(
            "INSERT INTO session (token_hash, user_id, created_at, expires_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&session.token_hash)
        .bind(&session.user_id)
        .bind(&session.created_at)
        .bind(&session.expires_at)
        .execute(self.pool)
        .await
        .map_err(|e| map_sqlx("Session", e))?;

        Ok(())
    }

    async fn find_user(&self, token_hash: &str, now: &str) -> DbResult<Option<User>> {
        let row = sqlx::query(
            "SELECT u.id, u.email, u.name, u.password_hash, u.created_at, u.updated_at
             FROM session s JOIN user u ON u.id = s.user_id
             WHERE s.token_hash = ? AND s.expires_at > ?",
        )
        .bind(token_hash)
        .bind(now)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| map_sqlx("Session", e))?;

        Ok(row.map(|row| User {
            id: row.get("id"),
            email: row.get("email"),
            name: row.get("name"),
            password_hash: row.get("password_hash"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }))
    }

    async fn delete(&self, token_hash: &str) -> DbResult<()> {
        sqlx::query("DELETE FROM session WHERE token_hash = ?")
            .bind(token_hash)
            .execute(self.pool)
            .await
            .map_err(|e| map_sqlx("Session", e))?;
        Ok(())
    }

    async fn delete_expired(&self, now: &str) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM session WHERE expires_at <= ?")
            .bind(now)
            .execute(self.pool)
            .await
            .map_err(|e| map_sqlx("Session", e))?;
        Ok(result.rows_affected())
    }

    async fn delete_for_user(&self, user_id: &str, keep: Option<&str>) -> DbResult<u64> {
        let result = sqlx::query(
            "DELETE FROM session WHERE user_id = ? AND (? IS NULL OR token_hash != ?)",
        )
        .bind(user_id)
        .bind(keep)
        .bind(keep)
        .execute(self.pool)
        .await
        .map_err(|e| map_sqlx("Session", e))?;
        Ok(result.rows_affected())
    }
}
