//! Database abstraction layer.
//!
//! This module provides trait-based abstractions for data access,
//! allowing different storage backends to be swapped without changing
//! business logic.
//!
//! # Architecture
//!
//! - `error`: Storage-agnostic error types
//! - `models`: Domain entities (Contact, Event, Fabric, Faq, GalleryItem, ...)
//! - `repository`: Trait definitions for data access
//! - `validation`: Per-entity input checks
//! - `sqlite`: SQLite implementation (sqlx)

mod error;
mod models;
mod repository;
pub mod sqlite;
pub mod utils;
mod validation;

#[cfg(test)]
mod validation_test;

pub use error::{DbError, DbResult};
pub use models::*;
pub use repository::*;
pub use sqlite::SqliteDatabase;
pub use validation::{Validate, is_valid_email, is_valid_image_url, is_valid_slug};
