use miette::Diagnostic;
use thiserror::Error;

/// Errors from password handling.
#[derive(Error, Diagnostic, Debug)]
pub enum AuthError {
    #[error("Password hashing failed: {message}")]
    #[diagnostic(code(atelier::auth::hash))]
    Hash { message: String },

    #[error("Password must be at least {min} characters")]
    #[diagnostic(
        code(atelier::auth::weak_password),
        help("Choose a longer password")
    )]
    WeakPassword { min: usize },
}

pub type AuthResult<T> = Result<T, AuthError>;
