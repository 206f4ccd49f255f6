use miette::Diagnostic;
use thiserror::Error;

use crate::auth::AuthError;
use crate::db::DbError;

#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    #[error("Failed to open database: {message}")]
    #[diagnostic(
        code(atelier::cli::database_unavailable),
        help("Check the --db path or set ATELIER_DB to point to the site database.")
    )]
    DatabaseUnavailable { message: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Database(#[from] DbError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Auth(#[from] AuthError),

    #[error("Invalid argument: {message}")]
    #[diagnostic(code(atelier::cli::invalid_argument))]
    InvalidArgument { message: String },

    #[error("Failed to serialize output: {message}")]
    #[diagnostic(code(atelier::cli::output))]
    Output { message: String },
}

impl CliError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        CliError::InvalidArgument {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Output {
            message: e.to_string(),
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
