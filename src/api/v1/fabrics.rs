//! Fabric catalog handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use crate::api::AppState;
use crate::api::error::{ApiError, ErrorResponse};
use crate::api::notifier::{Entity, UpdateMessage};
use crate::db::{Database, Fabric, FabricRepository};
use crate::table::{self, TablePage, TableQuery};

use super::{CatalogParams, SuccessResponse, default_true};

// =============================================================================
// DTOs
// =============================================================================

#[derive(Serialize, ToSchema)]
pub struct FabricResponse {
    #[schema(example = "a1b2c3d4")]
    pub id: String,
    #[schema(example = "Кашемир")]
    pub name: String,
    pub description: Option<String>,
    #[schema(example = "100% кашемир")]
    pub composition: Option<String>,
    #[schema(example = "графит")]
    pub color: Option<String>,
    #[schema(example = "wool")]
    pub category: String,
    /// Whole rubles
    #[schema(example = 4500)]
    pub price_per_meter: Option<i64>,
    #[schema(example = "/uploads/fabrics/cashmere.jpg")]
    pub image_url: Option<String>,
    pub in_stock: bool,
    pub featured: bool,
    pub active: bool,
    pub order: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Fabric> for FabricResponse {
    fn from(f: Fabric) -> Self {
        Self {
            id: f.id,
            name: f.name,
            description: f.description,
            composition: f.composition,
            color: f.color,
            category: f.category,
            price_per_meter: f.price_per_meter,
            image_url: f.image_url,
            in_stock: f.in_stock,
            featured: f.featured,
            active: f.active,
            order: f.order,
            created_at: f.created_at,
            updated_at: f.updated_at,
        }
    }
}

/// Body for creating or replacing a fabric.
#[derive(Debug, Deserialize, ToSchema)]
pub struct FabricRequest {
    #[schema(example = "Кашемир")]
    pub name: String,
    pub description: Option<String>,
    pub composition: Option<String>,
    pub color: Option<String>,
    #[schema(example = "wool")]
    pub category: String,
    pub price_per_meter: Option<i64>,
    pub image_url: Option<String>,
    #[serde(default = "default_true")]
    pub in_stock: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub order: i64,
}

impl FabricRequest {
    fn apply_to(self, fabric: &mut Fabric) {
        fabric.name = self.name;
        fabric.description = self.description;
        fabric.composition = self.composition;
        fabric.color = self.color;
        fabric.category = self.category;
        fabric.price_per_meter = self.price_per_meter;
        fabric.image_url = self.image_url;
        fabric.in_stock = self.in_stock;
        fabric.featured = self.featured;
        fabric.active = self.active;
        fabric.order = self.order;
    }
}

#[derive(Serialize, ToSchema)]
pub struct PaginatedFabrics {
    pub items: Vec<FabricResponse>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
}

impl From<TablePage<Fabric>> for PaginatedFabrics {
    fn from(page: TablePage<Fabric>) -> Self {
        let page = page.map(FabricResponse::from);
        Self {
            items: page.items,
            total: page.total,
            page: page.page,
            per_page: page.per_page,
            total_pages: page.total_pages,
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

#[utoipa::path(
    get,
    path = "/api/v1/admin/fabrics",
    tag = "fabrics",
    params(TableQuery, CatalogParams),
    responses(
        (status = 200, description = "Paginated fabrics", body = PaginatedFabrics),
        (status = 401, description = "Not logged in", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_fabrics<D: Database>(
    State(state): State<AppState<D>>,
    Query(table_query): Query<TableQuery>,
    Query(params): Query<CatalogParams>,
) -> Result<Json<PaginatedFabrics>, ApiError> {
    let fabrics = state.db().fabrics().list(&params.to_query()).await?;
    Ok(Json(table::apply(fabrics, &table_query).into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/fabrics/{id}",
    tag = "fabrics",
    params(("id" = String, Path, description = "Fabric ID")),
    responses(
        (status = 200, description = "Fabric found", body = FabricResponse),
        (status = 404, description = "Fabric not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_fabric<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<Json<FabricResponse>, ApiError> {
    let fabric = state.db().fabrics().get(&id).await?;
    Ok(Json(fabric.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/fabrics",
    tag = "fabrics",
    request_body = FabricRequest,
    responses(
        (status = 201, description = "Fabric created", body = FabricResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_fabric<D: Database>(
    State(state): State<AppState<D>>,
    Json(req): Json<FabricRequest>,
) -> Result<(StatusCode, Json<FabricResponse>), ApiError> {
    let mut fabric = Fabric {
        id: String::new(),
        name: String::new(),
        description: None,
        composition: None,
        color: None,
        category: String::new(),
        price_per_meter: None,
        image_url: None,
        in_stock: true,
        featured: false,
        active: true,
        order: 0,
        created_at: String::new(),
        updated_at: String::new(),
    };
    req.apply_to(&mut fabric);

    let created = state.db().fabrics().create(&fabric).await?;
    state.publish(UpdateMessage::created(Entity::Fabric, &created.id));

    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/fabrics/{id}",
    tag = "fabrics",
    params(("id" = String, Path, description = "Fabric ID")),
    request_body = FabricRequest,
    responses(
        (status = 200, description = "Fabric updated", body = FabricResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Fabric not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_fabric<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
    Json(req): Json<FabricRequest>,
) -> Result<Json<FabricResponse>, ApiError> {
    let mut fabric = state.db().fabrics().get(&id).await?;
    req.apply_to(&mut fabric);

    let updated = state.db().fabrics().update(&fabric).await?;
    state.publish(UpdateMessage::updated(Entity::Fabric, &id));

    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/fabrics/{id}",
    tag = "fabrics",
    params(("id" = String, Path, description = "Fabric ID")),
    responses(
        (status = 200, description = "Fabric deleted", body = SuccessResponse),
        (status = 404, description = "Fabric not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_fabric<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state.db().fabrics().delete(&id).await?;
    state.publish(UpdateMessage::deleted(Entity::Fabric, &id));

    Ok(Json(SuccessResponse::ok()))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/fabrics/{id}/toggle-active",
    tag = "fabrics",
    params(("id" = String, Path, description = "Fabric ID")),
    responses(
        (status = 200, description = "Active flag flipped", body = FabricResponse),
        (status = 404, description = "Fabric not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn toggle_fabric_active<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<Json<FabricResponse>, ApiError> {
    let fabric = state.db().fabrics().toggle_active(&id).await?;
    state.publish(UpdateMessage::updated(Entity::Fabric, &id));

    Ok(Json(fabric.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/fabrics/{id}/toggle-featured",
    tag = "fabrics",
    params(("id" = String, Path, description = "Fabric ID")),
    responses(
        (status = 200, description = "Featured flag flipped", body = FabricResponse),
        (status = 404, description = "Fabric not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn toggle_fabric_featured<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<Json<FabricResponse>, ApiError> {
    let fabric = state.db().fabrics().toggle_featured(&id).await?;
    state.publish(UpdateMessage::updated(Entity::Fabric, &id));

    Ok(Json(fabric.into()))
}
