//! Admin login, logout and account handlers.

use axum::{
    Extension, Json,
    extract::State,
    http::{HeaderMap, header::SET_COOKIE},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use utoipa::ToSchema;

use crate::api::AppState;
use crate::api::error::{ApiError, ErrorResponse};
use crate::api::session::{CurrentUser, session_token_hash};
use crate::auth::{
    check_password_strength, clear_cookie, hash_password, new_session, session_cookie,
    verify_password,
};
use crate::db::utils::current_timestamp;
use crate::db::{Database, SessionRepository, User, UserRepository};

use super::SuccessResponse;

// =============================================================================
// DTOs
// =============================================================================

#[derive(Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = "a1b2c3d4")]
    pub id: String,
    #[schema(example = "admin@atelier.ru")]
    pub email: String,
    #[schema(example = "Администратор")]
    pub name: String,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            name: u.name,
            created_at: u.created_at,
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "admin@atelier.ru")]
    pub email: String,
    pub password: String,
    /// Keep the session for 30 days instead of 7
    #[serde(default)]
    pub remember: bool,
}

// Keep passwords out of request spans.
impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("remember", &self.remember)
            .finish_non_exhaustive()
    }
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    #[schema(example = true)]
    pub success: bool,
    pub user: UserResponse,
}

#[derive(Deserialize, ToSchema)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

impl std::fmt::Debug for ChangePasswordRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ChangePasswordRequest { .. }")
    }
}

// =============================================================================
// Handlers
// =============================================================================

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; session cookie set", body = LoginResponse),
        (status = 401, description = "Wrong email or password", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn login<D: Database>(
    State(state): State<AppState<D>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.db().users().get_by_email(&req.email).await?;

    let Some(user) = user.filter(|u| verify_password(&req.password, &u.password_hash)) else {
        warn!(email = %req.email, "Failed login attempt");
        return Err(ApiError::InvalidCredentials);
    };

    let sessions = state.db().sessions();
    if let Err(e) = sessions.delete_expired(&current_timestamp()).await {
        warn!("Failed to purge expired sessions: {}", e);
    }

    let config = state.session_config();
    let (token, session) = new_session(&user.id, req.remember, config);
    sessions.create(&session).await?;
    info!(user_id = %user.id, "Admin logged in");

    let cookie = session_cookie(&token, req.remember, config);
    Ok((
        [(SET_COOKIE, cookie)],
        Json(LoginResponse {
            success: true,
            user: UserResponse::from(user),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Session ended; cookie cleared", body = SuccessResponse)
    )
)]
#[instrument(skip(state, headers))]
pub async fn logout<D: Database>(
    State(state): State<AppState<D>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(token_hash) = session_token_hash(&headers) {
        state.db().sessions().delete(&token_hash).await?;
    }

    Ok((
        [(SET_COOKIE, clear_cookie(state.session_config()))],
        Json(SuccessResponse::ok()),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "auth",
    responses(
        (status = 200, description = "Current admin", body = UserResponse),
        (status = 401, description = "Not logged in", body = ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn me(Extension(current): Extension<CurrentUser>) -> Json<UserResponse> {
    Json(UserResponse::from(current.user))
}

#[utoipa::path(
    put,
    path = "/api/v1/auth/password",
    tag = "auth",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed; other sessions ended", body = SuccessResponse),
        (status = 400, description = "New password too short", body = ErrorResponse),
        (status = 401, description = "Current password wrong", body = ErrorResponse)
    )
)]
#[instrument(skip(state, current))]
pub async fn change_password<D: Database>(
    State(state): State<AppState<D>>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    if !verify_password(&req.current_password, &current.user.password_hash) {
        return Err(ApiError::InvalidCredentials);
    }
    check_password_strength(&req.new_password)?;

    let hash = hash_password(&req.new_password)?;
    state
        .db()
        .users()
        .update_password(&current.user.id, &hash)
        .await?;

    let ended = state
        .db()
        .sessions()
        .delete_for_user(&current.user.id, Some(&current.token_hash))
        .await?;
    info!(user_id = %current.user.id, ended, "Password changed");

    Ok(Json(SuccessResponse::ok()))
}
