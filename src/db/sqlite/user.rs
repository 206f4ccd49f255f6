//! SQLite UserRepository implementation.

use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use super::helpers::map_sqlx;
use crate::db::utils::{current_timestamp, generate_entity_id, or_generate};
use crate::db::{DbError, DbResult, User, UserRepository, Validate};

/// SQLx-backed user repository.
pub struct SqliteUserRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

const COLUMNS: &str = "id, email, name, password_hash, created_at, updated_at";

fn row_to_user(row: &SqliteRow) -> User {
    User {
        id: row.get("id"),
        email: row.get("email"),
        name: row.get("name"),
        password_hash: row.get("password_hash"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// Emails are compared and stored lowercase.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl<'a> UserRepository for SqliteUserRepository<'a> {
    async fn create(&self, user: &User) -> DbResult<User> {
        user.validate()?;

        let now = current_timestamp();
        let stored = User {
            id: or_generate(&user.id, generate_entity_id),
            email: normalize_email(&user.email),
            name: user.name.trim().to_string(),
            password_hash: user.password_hash.clone(),
            created_at: or_generate(&user.created_at, || now.clone()),
            updated_at: or_generate(&user.updated_at, || now.clone()),
        };

        sqlx::query(
            "INSERT INTO user (id, email, name, password_hash, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&stored.id)
        .bind(&stored.email)
        .bind(&stored.name)
        .bind(&stored.password_hash)
        .bind(&stored.created_at)
        .bind(&stored.updated_at)
        .execute(self.pool)
        .await
        .map_err(|e| match map_sqlx("User", e) {
            DbError::AlreadyExists { entity_type, .. } => DbError::AlreadyExists {
                entity_type,
                id: stored.email.clone(),
            },
            other => other,
        })?;

        Ok(stored)
    }

    async fn get(&self, id: &str) -> DbResult<User> {
        let sql = format!("SELECT {COLUMNS} FROM user WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| map_sqlx("User", e))?;

        row.map(|r| row_to_user(&r))
            .ok_or_else(|| DbError::not_found("User", id))
    }

    async fn get_by_email(&self, email: &str) -> DbResult<Option<User>> {
        let sql = format!("SELECT {COLUMNS} FROM user WHERE email = ?");
        let row = sqlx::query(&sql)
            .bind(normalize_email(email))
            .fetch_optional(self.pool)
            .await
            .map_err(|e| map_sqlx("User", e))?;

        Ok(row.map(|r| row_to_user(&r)))
    }

    async fn list(&self) -> DbResult<Vec<User>> {
        let sql = format!("SELECT {COLUMNS} FROM user ORDER BY email");
        let rows = sqlx::query(&sql)
            .fetch_all(self.pool)
            .await
            .map_err(|e| map_sqlx("User", e))?;

        Ok(rows.iter().map(row_to_user).collect())
    }

    async fn update_password(&self, id: &str, password_hash: &str) -> DbResult<()> {
        if password_hash.is_empty() {
            return Err(DbError::validation("Пароль не задан"));
        }

        let result = sqlx::query("UPDATE user SET password_hash = ?, updated_at = ? WHERE id = ?")
            .bind(password_hash)
            .bind(current_timestamp())
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| map_sqlx("User", e))?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", id));
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> DbResult<()> {
        super::helpers::delete_by_id(self.pool, "user", "User", id).await
    }
}
