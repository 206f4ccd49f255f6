//! Session tokens and the admin cookie.
//!
//! The browser holds a random token; the database only ever sees its
//! sha256. A leaked database therefore cannot be replayed as cookies.

use argon2::password_hash::rand_core::{OsRng, RngCore};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use sha2::{Digest, Sha256};

use crate::db::Session;
use crate::db::utils::{current_timestamp, timestamp_in_days};

/// Name of the admin session cookie.
pub const SESSION_COOKIE: &str = "admin-session";

const TOKEN_BYTES: usize = 32;
const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Longest accepted session lifetime, in days.
pub const MAX_SESSION_DAYS: i64 = 3650;

/// Cookie and lifetime settings for admin sessions.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Add the `Secure` attribute (production deployments behind TLS).
    pub secure: bool,
    /// Lifetime of a regular login, in days.
    pub ttl_days: i64,
    /// Lifetime of a "remember me" login, in days.
    pub remember_ttl_days: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secure: false,
            ttl_days: 7,
            remember_ttl_days: 30,
        }
    }
}

impl SessionConfig {
    /// Lifetime in days, kept within `1..=MAX_SESSION_DAYS`.
    pub fn ttl_for(&self, remember: bool) -> i64 {
        let days = if remember {
            self.remember_ttl_days
        } else {
            self.ttl_days
        };
        days.clamp(1, MAX_SESSION_DAYS)
    }
}

/// Random URL-safe token for a new session.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Hex sha256 of a token, as stored in the `session` table.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|byte| format!("{:02x}", byte))
        .collect()
}

/// Create a token and the session row that belongs to it.
pub fn new_session(user_id: &str, remember: bool, config: &SessionConfig) -> (String, Session) {
    let token = generate_token();
    let session = Session {
        token_hash: hash_token(&token),
        user_id: user_id.to_string(),
        created_at: current_timestamp(),
        expires_at: timestamp_in_days(config.ttl_for(remember)),
    };
    (token, session)
}

fn cookie(value: &str, max_age: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{SESSION_COOKIE}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value carrying a session token.
pub fn session_cookie(token: &str, remember: bool, config: &SessionConfig) -> String {
    let max_age = config
        .ttl_for(remember)
        .saturating_mul(SECONDS_PER_DAY);
    cookie(token, max_age, config.secure)
}

/// `Set-Cookie` value that removes the session cookie.
pub fn clear_cookie(config: &SessionConfig) -> String {
    cookie("", 0, config.secure)
}

/// Extract the session token from a `Cookie` request header.
pub fn token_from_cookies(header: &str) -> Option<&str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}
