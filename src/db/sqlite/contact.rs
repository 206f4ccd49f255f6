//! SQLite ContactRepository implementation.

use std::collections::HashMap;

use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use super::helpers::{delete_by_id, map_sqlx, parse_column};
use crate::db::utils::{current_timestamp, generate_entity_id, or_generate};
use crate::db::{
    Contact, ContactQuery, ContactRepository, ContactStatus, DbError, DbResult, Validate,
};

/// SQLx-backed contact repository.
pub struct SqliteContactRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

const COLUMNS: &str =
    "id, name, email, phone, subject, message, service_id, status, notes, created_at, updated_at";

fn row_to_contact(row: &SqliteRow) -> DbResult<Contact> {
    let status: String = row.get("status");
    Ok(Contact {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        phone: row.get("phone"),
        subject: row.get("subject"),
        message: row.get("message"),
        service_id: row.get("service_id"),
        status: parse_column(&status)?,
        notes: row.get("notes"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

/// Blank optional text is stored as NULL.
fn blank_to_none(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl<'a> ContactRepository for SqliteContactRepository<'a> {
    async fn create(&self, contact: &Contact) -> DbResult<Contact> {
        contact.validate()?;

        let now = current_timestamp();
        let stored = Contact {
            id: or_generate(&contact.id, generate_entity_id),
            name: contact.name.trim().to_string(),
            email: contact.email.trim().to_string(),
            phone: blank_to_none(&contact.phone),
            subject: blank_to_none(&contact.subject),
            message: contact.message.trim().to_string(),
            service_id: blank_to_none(&contact.service_id),
            status: contact.status,
            notes: blank_to_none(&contact.notes),
            created_at: or_generate(&contact.created_at, || now.clone()),
            updated_at: or_generate(&contact.updated_at, || now.clone()),
        };

        sqlx::query(
            "INSERT INTO contact (id, name, email, phone, subject, message, service_id, status, notes, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&stored.id)
        .bind(&stored.name)
        .bind(&stored.email)
        .bind(&stored.phone)
        .bind(&stored.subject)
        .bind(&stored.message)
        .bind(&stored.service_id)
        .bind(stored.status.to_string())
        .bind(&stored.notes)
        .bind(&stored.created_at)
        .bind(&stored.updated_at)
        .execute(self.pool)
        .await
        .map_err(|e| map_sqlx("Contact", e))?;

        Ok(stored)
    }

    async fn get(&self, id: &str) -> DbResult<Contact> {
        let sql = format!("SELECT {COLUMNS} FROM contact WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| map_sqlx("Contact", e))?;

        match row {
            Some(row) => row_to_contact(&row),
            None => Err(DbError::not_found("Contact", id)),
        }
    }

    async fn list(&self, query: &ContactQuery) -> DbResult<Vec<Contact>> {
        let rows = match query.status {
            Some(status) => {
                let sql = format!(
                    "SELECT {COLUMNS} FROM contact WHERE status = ? ORDER BY created_at DESC, id"
                );
                sqlx::query(&sql)
                    .bind(status.to_string())
                    .fetch_all(self.pool)
                    .await
            }
            None => {
                let sql = format!("SELECT {COLUMNS} FROM contact ORDER BY created_at DESC, id");
                sqlx::query(&sql).fetch_all(self.pool).await
            }
        }
        .map_err(|e| map_sqlx("Contact", e))?;

        rows.iter().map(row_to_contact).collect()
    }

    async fn update(&self, contact: &Contact) -> DbResult<Contact> {
        contact.validate()?;

        let mut stored = contact.clone();
        stored.phone = blank_to_none(&contact.phone);
        stored.subject = blank_to_none(&contact.subject);
        stored.service_id = blank_to_none(&contact.service_id);
        stored.notes = blank_to_none(&contact.notes);
        stored.updated_at = current_timestamp();

        let result = sqlx::query(
            "UPDATE contact
             SET name = ?, email = ?, phone = ?, subject = ?, message = ?, service_id = ?,
                 status = ?, notes = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&stored.name)
        .bind(&stored.email)
        .bind(&stored.phone)
        .bind(&stored.subject)
        .bind(&stored.message)
        .bind(&stored.service_id)
        .bind(stored.status.to_string())
        .bind(&stored.notes)
        .bind(&stored.updated_at)
        .bind(&stored.id)
        .execute(self.pool)
        .await
        .map_err(|e| map_sqlx("Contact", e))?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Contact", &contact.id));
        }

        Ok(stored)
    }

    async fn set_status(&self, id: &str, status: ContactStatus) -> DbResult<Contact> {
        let result = sqlx::query("UPDATE contact SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status.to_string())
            .bind(current_timestamp())
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| map_sqlx("Contact", e))?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Contact", id));
        }

        self.get(id).await
    }

    async fn delete(&self, id: &str) -> DbResult<()> {
        delete_by_id(self.pool, "contact", "Contact", id).await
    }

    async fn count_by_status(&self) -> DbResult<HashMap<ContactStatus, usize>> {
        let rows = sqlx::query("SELECT status, COUNT(*) AS n FROM contact GROUP BY status")
            .fetch_all(self.pool)
            .await
            .map_err(|e| map_sqlx("Contact", e))?;

        let mut counts: HashMap<ContactStatus, usize> =
            ContactStatus::ALL.iter().map(|s| (*s, 0)).collect();
        for row in rows {
            let status: String = row.get("status");
            let n: i64 = row.get("n");
            counts.insert(parse_column(&status)?, n as usize);
        }
        Ok(counts)
    }
}
