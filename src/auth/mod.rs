//! Admin authentication primitives.
//!
//! - `password`: argon2id hashing and verification
//! - `session`: opaque session tokens and the `admin-session` cookie
//!
//! The HTTP side (login handlers, the admin middleware) lives in
//! [`crate::api`]; this module has no knowledge of axum.

mod error;
mod password;
mod session;

#[cfg(test)]
mod session_test;

pub use error::{AuthError, AuthResult};
pub use password::{MIN_PASSWORD_LEN, check_password_strength, hash_password, verify_password};
pub use session::{
    MAX_SESSION_DAYS, SESSION_COOKIE, SessionConfig, clear_cookie, generate_token, hash_token,
    new_session, session_cookie, token_from_cookies,
};
