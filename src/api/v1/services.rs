//! Service handlers.

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
use crate::db::{Database, Service, ServiceRepository};
use crate::table::{self, TablePage, TableQuery};

use super::{CatalogParams, SuccessResponse, default_true};

// =============================================================================
// DTOs
// =============================================================================

#[derive(Serialize, ToSchema)]
pub struct ServiceResponse {
    #[schema(example = "a1b2c3d4")]
    pub id: String,
    #[schema(example = "Индивидуальный пошив")]
    pub title: String,
    #[schema(example = "tailoring")]
    pub slug: String,
    pub description: String,
    /// Starting price, rubles
    #[schema(example = 15000)]
    pub price_from: Option<i64>,
    #[schema(example = "2-3 недели")]
    pub duration: Option<String>,
    pub features: Vec<String>,
    pub image_url: Option<String>,
    pub featured: bool,
    pub active: bool,
    pub order: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Service> for ServiceResponse {
    fn from(s: Service) -> Self {
        Self {
            id: s.id,
            title: s.title,
            slug: s.slug,
            description: s.description,
            price_from: s.price_from,
            duration: s.duration,
            features: s.features,
            image_url: s.image_url,
            featured: s.featured,
            active: s.active,
            order: s.order,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ServiceRequest {
    pub title: String,
    /// Lowercase latin letters, digits and dashes
    #[schema(example = "tailoring")]
    pub slug: String,
    pub description: String,
    pub price_from: Option<i64>,
    pub duration: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub order: i64,
}

impl ServiceRequest {
    fn apply_to(self, service: &mut Service) {
        service.title = self.title;
        service.slug = self.slug.trim().to_string();
        service.description = self.description;
        service.price_from = self.price_from;
        service.duration = self.duration;
        service.features = self.features;
        service.image_url = self.image_url;
        service.featured = self.featured;
        service.active = self.active;
        service.order = self.order;
    }
}

#[derive(Serialize, ToSchema)]
pub struct PaginatedServices {
    pub items: Vec<ServiceResponse>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
}

impl From<TablePage<Service>> for PaginatedServices {
    fn from(page: TablePage<Service>) -> Self {
        let page = page.map(ServiceResponse::from);
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
    path = "/api/v1/admin/services",
    tag = "services",
    params(TableQuery, CatalogParams),
    responses(
        (status = 200, description = "Paginated services", body = PaginatedServices),
        (status = 401, description = "Not logged in", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_services<D: Database>(
    State(state): State<AppState<D>>,
    Query(table_query): Query<TableQuery>,
    Query(params): Query<CatalogParams>,
) -> Result<Json<PaginatedServices>, ApiError> {
    let services = state.db().services().list(&params.to_query()).await?;
    Ok(Json(table::apply(services, &table_query).into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/services/{id}",
    tag = "services",
    params(("id" = String, Path, description = "Service ID")),
    responses(
        (status = 200, description = "Service found", body = ServiceResponse),
        (status = 404, description = "Service not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_service<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<Json<ServiceResponse>, ApiError> {
    let service = state.db().services().get(&id).await?;
    Ok(Json(service.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/services",
    tag = "services",
    request_body = ServiceRequest,
    responses(
        (status = 201, description = "Service created", body = ServiceResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 409, description = "Slug already taken", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_service<D: Database>(
    State(state): State<AppState<D>>,
    Json(req): Json<ServiceRequest>,
) -> Result<(StatusCode, Json<ServiceResponse>), ApiError> {
    let mut service = Service {
        id: String::new(),
        title: String::new(),
        slug: String::new(),
        description: String::new(),
        price_from: None,
        duration: None,
        features: vec![],
        image_url: None,
        featured: false,
        active: true,
        order: 0,
        created_at: String::new(),
        updated_at: String::new(),
    };
    req.apply_to(&mut service);

    let created = state.db().services().create(&service).await?;
    state.publish(UpdateMessage::created(Entity::Service, &created.id));

    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/services/{id}",
    tag = "services",
    params(("id" = String, Path, description = "Service ID")),
    request_body = ServiceRequest,
    responses(
        (status = 200, description = "Service updated", body = ServiceResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Service not found", body = ErrorResponse),
        (status = 409, description = "Slug already taken", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_service<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
    Json(req): Json<ServiceRequest>,
) -> Result<Json<ServiceResponse>, ApiError> {
    let mut service = state.db().services().get(&id).await?;
    req.apply_to(&mut service);

    let updated = state.db().services().update(&service).await?;
    state.publish(UpdateMessage::updated(Entity::Service, &id));

    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/services/{id}",
    tag = "services",
    params(("id" = String, Path, description = "Service ID")),
    responses(
        (status = 200, description = "Service deleted", body = SuccessResponse),
        (status = 404, description = "Service not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_service<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state.db().services().delete(&id).await?;
    state.publish(UpdateMessage::deleted(Entity::Service, &id));

    Ok(Json(SuccessResponse::ok()))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/services/{id}/toggle-active",
    tag = "services",
    params(("id" = String, Path, description = "Service ID")),
    responses(
        (status = 200, description = "Active flag flipped", body = ServiceResponse),
        (status = 404, description = "Service not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn toggle_service_active<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<Json<ServiceResponse>, ApiError> {
    let service = state.db().services().toggle_active(&id).await?;
    state.publish(UpdateMessage::updated(Entity::Service, &id));

    Ok(Json(service.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/services/{id}/toggle-featured",
    tag = "services",
    params(("id" = String, Path, description = "Service ID")),
    responses(
        (status = 200, description = "Featured flag flipped", body = ServiceResponse),
        (status = 404, description = "Service not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn toggle_service_featured<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<Json<ServiceResponse>, ApiError> {
    let service = state.db().services().toggle_featured(&id).await?;
    state.publish(UpdateMessage::updated(Entity::Service, &id));

    Ok(Json(service.into()))
}
