//! Database error types.
//!
//! This module provides abstracted error types for database operations.
//! It uses miette for fancy diagnostic output and thiserror for derive macros.
//! The error types are storage-backend agnostic.

use miette::Diagnostic;
use thiserror::Error;

/// Database operation errors.
#[derive(Error, Diagnostic, Debug)]
pub enum DbError {
    #[error("Entity not found: {entity_type} with id '{id}'")]
    #[diagnostic(code(atelier::db::not_found))]
    NotFound { entity_type: String, id: String },

    #[error("Entity already exists: {entity_type} with id '{id}'")]
    #[diagnostic(code(atelier::db::already_exists))]
    AlreadyExists { entity_type: String, id: String },

    /// Input rejected before reaching storage. `message` is shown to the user as-is.
    #[error("Validation error: {message}")]
    #[diagnostic(code(atelier::db::validation_error))]
    Validation { message: String },

    #[error("Database error: {message}")]
    #[diagnostic(code(atelier::db::database_error))]
    Database { message: String },

    #[error("Migration error: {message}")]
    #[diagnostic(code(atelier::db::migration_error))]
    Migration { message: String },

    #[error("Connection error: {message}")]
    #[diagnostic(code(atelier::db::connection_error))]
    Connection { message: String },

    #[error("Constraint violation: {message}")]
    #[diagnostic(code(atelier::db::constraint))]
    Constraint { message: String },
}

impl DbError {
    pub fn not_found(entity_type: &str, id: &str) -> Self {
        DbError::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        DbError::Validation {
            message: message.into(),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
