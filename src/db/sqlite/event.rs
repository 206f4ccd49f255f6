//! SQLite EventRepository implementation.

use chrono::NaiveDateTime;
use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use super::helpers::{delete_by_id, map_sqlx, parse_column};
use crate::db::utils::{current_timestamp, generate_entity_id, or_generate};
use crate::db::{DbError, DbResult, Event, EventQuery, EventRepository, EventStatus, Validate};

/// SQLx-backed event repository.
pub struct SqliteEventRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

const COLUMNS: &str = "id, title, description, event_type, status, start_at, end_at, all_day, \
                       location, contact_id, created_at, updated_at";

fn row_to_event(row: &SqliteRow) -> DbResult<Event> {
    let event_type: String = row.get("event_type");
    let status: String = row.get("status");
    Ok(Event {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        event_type: parse_column(&event_type)?,
        status: parse_column(&status)?,
        start_at: row.try_get("start_at").map_err(|e| DbError::Database {
            message: format!("Invalid start_at: {}", e),
        })?,
        end_at: row.try_get("end_at").map_err(|e| DbError::Database {
            message: format!("Invalid end_at: {}", e),
        })?,
        all_day: row.get("all_day"),
        location: row.get("location"),
        contact_id: row.get("contact_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

impl<'a> EventRepository for SqliteEventRepository<'a> {
    async fn create(&self, event: &Event) -> DbResult<Event> {
        event.validate()?;

        let now = current_timestamp();
        let mut stored = event.clone();
        stored.id = or_generate(&event.id, generate_entity_id);
        stored.title = event.title.trim().to_string();
        stored.created_at = or_generate(&event.created_at, || now.clone());
        stored.updated_at = or_generate(&event.updated_at, || now.clone());

        sqlx::query(
            "INSERT INTO event (id, title, description, event_type, status, start_at, end_at, all_day,
                                location, contact_id, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&stored.id)
        .bind(&stored.title)
        .bind(&stored.description)
        .bind(stored.event_type.to_string())
        .bind(stored.status.to_string())
        .bind(stored.start_at)
        .bind(stored.end_at)
        .bind(stored.all_day)
        .bind(&stored.location)
        .bind(&stored.contact_id)
        .bind(&stored.created_at)
        .bind(&stored.updated_at)
        .execute(self.pool)
        .await
        .map_err(|e| map_sqlx("Event", e))?;

        Ok(stored)
    }

    async fn get(&self, id: &str) -> DbResult<Event> {
        let sql = format!("SELECT {COLUMNS} FROM event WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| map_sqlx("Event", e))?;

        match row {
            Some(row) => row_to_event(&row),
            None => Err(DbError::not_found("Event", id)),
        }
    }

    async fn list(&self, query: &EventQuery) -> DbResult<Vec<Event>> {
        let mut conditions = Vec::new();
        if query.from.is_some() {
            conditions.push("start_at >= ?");
        }
        if query.to.is_some() {
            conditions.push("start_at <= ?");
        }
        if query.status.is_some() {
            conditions.push("status = ?");
        }
        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!("SELECT {COLUMNS} FROM event {where_clause} ORDER BY start_at, id");
        let mut q = sqlx::query(&sql);
        if let Some(from) = query.from {
            q = q.bind(from);
        }
        if let Some(to) = query.to {
            q = q.bind(to);
        }
        if let Some(status) = query.status {
            q = q.bind(status.to_string());
        }

        let rows = q
            .fetch_all(self.pool)
            .await
            .map_err(|e| map_sqlx("Event", e))?;

        rows.iter().map(row_to_event).collect()
    }

    async fn update(&self, event: &Event) -> DbResult<Event> {
        event.validate()?;

        let mut stored = event.clone();
        stored.title = event.title.trim().to_string();
        stored.updated_at = current_timestamp();

        let result = sqlx::query(
            "UPDATE event
             SET title = ?, description = ?, event_type = ?, status = ?, start_at = ?, end_at = ?,
                 all_day = ?, location = ?, contact_id = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&stored.title)
        .bind(&stored.description)
        .bind(stored.event_type.to_string())
        .bind(stored.status.to_string())
        .bind(stored.start_at)
        .bind(stored.end_at)
        .bind(stored.all_day)
        .bind(&stored.location)
        .bind(&stored.contact_id)
        .bind(&stored.updated_at)
        .bind(&stored.id)
        .execute(self.pool)
        .await
        .map_err(|e| map_sqlx("Event", e))?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Event", &event.id));
        }

        Ok(stored)
    }

    async fn delete(&self, id: &str) -> DbResult<()> {
        delete_by_id(self.pool, "event", "Event", id).await
    }

    async fn count_upcoming(&self, now: NaiveDateTime) -> DbResult<usize> {
        let n: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM event WHERE status = ? AND start_at >= ?")
                .bind(EventStatus::Scheduled.to_string())
                .bind(now)
                .fetch_one(self.pool)
                .await
                .map_err(|e| map_sqlx("Event", e))?;
        Ok(n as usize)
    }
}
