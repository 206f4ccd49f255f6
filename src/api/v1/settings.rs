//! Site settings handlers.

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::{info, instrument};
use utoipa::ToSchema;

use crate::api::AppState;
use crate::api::error::{ApiError, ErrorResponse};
use crate::api::notifier::{Entity, UpdateMessage};
use crate::db::{Database, Setting, SettingRepository};

use super::SuccessResponse;

#[derive(Serialize, ToSchema)]
pub struct SettingResponse {
    #[schema(example = "site_name")]
    pub key: String,
    #[schema(example = "Ателье")]
    pub value: String,
    pub updated_at: String,
}

impl From<Setting> for SettingResponse {
    fn from(s: Setting) -> Self {
        Self {
            key: s.key,
            value: s.value,
            updated_at: s.updated_at,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/settings",
    tag = "settings",
    responses(
        (status = 200, description = "All settings, sorted by key", body = Vec<SettingResponse>),
        (status = 401, description = "Not logged in", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_settings<D: Database>(
    State(state): State<AppState<D>>,
) -> Result<Json<Vec<SettingResponse>>, ApiError> {
    let settings = state.db().settings().list().await?;
    Ok(Json(settings.into_iter().map(SettingResponse::from).collect()))
}

/// Body is a flat `{ "key": "value" }` map; every pair is written in one
/// transaction.
#[utoipa::path(
    put,
    path = "/api/v1/admin/settings",
    tag = "settings",
    request_body(content = BTreeMap<String, String>, description = "Key/value pairs to store"),
    responses(
        (status = 200, description = "Stored settings", body = Vec<SettingResponse>),
        (status = 400, description = "Invalid key", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_settings<D: Database>(
    State(state): State<AppState<D>>,
    Json(values): Json<BTreeMap<String, String>>,
) -> Result<Json<Vec<SettingResponse>>, ApiError> {
    let pairs: Vec<(String, String)> = values.into_iter().collect();
    let stored = state.db().settings().upsert_many(&pairs).await?;

    info!(count = stored.len(), "Settings updated");
    for setting in &stored {
        state.notifier().notify(UpdateMessage::updated(Entity::Setting, &setting.key));
    }
    state.revalidate(Entity::Setting.public_paths());

    Ok(Json(stored.into_iter().map(SettingResponse::from).collect()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/settings/{key}",
    tag = "settings",
    params(("key" = String, Path, description = "Setting key")),
    responses(
        (status = 200, description = "Setting deleted", body = SuccessResponse),
        (status = 404, description = "Setting not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_setting<D: Database>(
    State(state): State<AppState<D>>,
    Path(key): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state.db().settings().delete(&key).await?;
    state.publish(UpdateMessage::deleted(Entity::Setting, &key));

    Ok(Json(SuccessResponse::ok()))
}
