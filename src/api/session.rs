//! Admin session middleware.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::COOKIE},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use super::error::ApiError;
use super::state::AppState;
use crate::auth::{hash_token, token_from_cookies};
use crate::db::utils::current_timestamp;
use crate::db::{Database, SessionRepository, User};

/// The logged-in admin, inserted into request extensions by [`require_admin`].
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    /// Hash of the session token used for this request.
    pub token_hash: String,
}

/// Hash of the session token carried by the request, if any.
pub fn session_token_hash(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(token_from_cookies)
        .map(hash_token)
}

/// Reject requests without a live session with 401.
pub async fn require_admin<D: Database + 'static>(
    State(state): State<AppState<D>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(token_hash) = session_token_hash(request.headers()) else {
        debug!("No session cookie");
        return Err(ApiError::Unauthorized);
    };

    let user = state
        .db()
        .sessions()
        .find_user(&token_hash, &current_timestamp())
        .await?
        .ok_or(ApiError::Unauthorized)?;

    request
        .extensions_mut()
        .insert(CurrentUser { user, token_hash });
    Ok(next.run(request).await)
}
