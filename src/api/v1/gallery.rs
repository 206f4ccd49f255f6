//! Gallery handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;

use crate::api::AppState;
use crate::api::error::{ApiError, ErrorResponse};
use crate::api::notifier::{Entity, UpdateMessage};
use crate::db::{Database, GalleryItem, GalleryRepository};
use crate::table::{self, TablePage, TableQuery};

use super::{CatalogParams, SuccessResponse, default_true};

// =============================================================================
// DTOs
// =============================================================================

#[derive(Serialize, ToSchema)]
pub struct GalleryItemResponse {
    #[schema(example = "a1b2c3d4")]
    pub id: String,
    #[schema(example = "Пальто из кашемира")]
    pub title: String,
    pub description: Option<String>,
    #[schema(example = "/uploads/coats/coat-1.jpg")]
    pub image_url: String,
    #[schema(example = "coats")]
    pub category: String,
    pub tags: Vec<String>,
    pub fabric_ids: Vec<String>,
    pub featured: bool,
    pub active: bool,
    pub order: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<GalleryItem> for GalleryItemResponse {
    fn from(g: GalleryItem) -> Self {
        Self {
            id: g.id,
            title: g.title,
            description: g.description,
            image_url: g.image_url,
            category: g.category,
            tags: g.tags,
            fabric_ids: g.fabric_ids,
            featured: g.featured,
            active: g.active,
            order: g.order,
            created_at: g.created_at,
            updated_at: g.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct GalleryItemRequest {
    pub title: String,
    pub description: Option<String>,
    /// Absolute http(s) URL or site-relative path
    #[schema(example = "/uploads/coats/coat-1.jpg")]
    pub image_url: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub fabric_ids: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub order: i64,
}

impl GalleryItemRequest {
    fn apply_to(self, item: &mut GalleryItem) {
        item.title = self.title;
        item.description = self.description;
        item.image_url = self.image_url;
        item.category = self.category;
        item.tags = self.tags;
        item.fabric_ids = self.fabric_ids;
        item.featured = self.featured;
        item.active = self.active;
        item.order = self.order;
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReorderItem {
    #[schema(example = "a1b2c3d4")]
    pub id: String,
    #[schema(example = 0)]
    pub order: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReorderRequest {
    pub items: Vec<ReorderItem>,
}

#[derive(Serialize, ToSchema)]
pub struct PaginatedGalleryItems {
    pub items: Vec<GalleryItemResponse>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
}

impl From<TablePage<GalleryItem>> for PaginatedGalleryItems {
    fn from(page: TablePage<GalleryItem>) -> Self {
        let page = page.map(GalleryItemResponse::from);
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
    path = "/api/v1/admin/gallery",
    tag = "gallery",
    params(TableQuery, CatalogParams),
    responses(
        (status = 200, description = "Paginated gallery items", body = PaginatedGalleryItems),
        (status = 401, description = "Not logged in", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_gallery<D: Database>(
    State(state): State<AppState<D>>,
    Query(table_query): Query<TableQuery>,
    Query(params): Query<CatalogParams>,
) -> Result<Json<PaginatedGalleryItems>, ApiError> {
    let items = state.db().gallery().list(&params.to_query()).await?;
    Ok(Json(table::apply(items, &table_query).into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/gallery/{id}",
    tag = "gallery",
    params(("id" = String, Path, description = "Gallery item ID")),
    responses(
        (status = 200, description = "Gallery item found", body = GalleryItemResponse),
        (status = 404, description = "Gallery item not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_gallery_item<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<Json<GalleryItemResponse>, ApiError> {
    let item = state.db().gallery().get(&id).await?;
    Ok(Json(item.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/gallery",
    tag = "gallery",
    request_body = GalleryItemRequest,
    responses(
        (status = 201, description = "Gallery item created", body = GalleryItemResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_gallery_item<D: Database>(
    State(state): State<AppState<D>>,
    Json(req): Json<GalleryItemRequest>,
) -> Result<(StatusCode, Json<GalleryItemResponse>), ApiError> {
    let mut item = GalleryItem {
        id: String::new(),
        title: String::new(),
        description: None,
        image_url: String::new(),
        category: String::new(),
        tags: vec![],
        fabric_ids: vec![],
        featured: false,
        active: true,
        order: 0,
        created_at: String::new(),
        updated_at: String::new(),
    };
    req.apply_to(&mut item);

    let created = state.db().gallery().create(&item).await?;
    state.publish(UpdateMessage::created(Entity::Gallery, &created.id));

    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/gallery/reorder",
    tag = "gallery",
    request_body = ReorderRequest,
    responses(
        (status = 200, description = "New order applied", body = SuccessResponse),
        (status = 404, description = "Unknown item; nothing changed", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn reorder_gallery<D: Database>(
    State(state): State<AppState<D>>,
    Json(req): Json<ReorderRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let orders: Vec<(String, i64)> = req
        .items
        .into_iter()
        .map(|item| (item.id, item.order))
        .collect();

    state.db().gallery().reorder(&orders).await?;
    info!(count = orders.len(), "Gallery reordered");
    state.publish(UpdateMessage::Reordered {
        entity: Entity::Gallery,
    });

    Ok(Json(SuccessResponse::ok()))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/gallery/{id}",
    tag = "gallery",
    params(("id" = String, Path, description = "Gallery item ID")),
    request_body = GalleryItemRequest,
    responses(
        (status = 200, description = "Gallery item updated", body = GalleryItemResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Gallery item not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_gallery_item<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
    Json(req): Json<GalleryItemRequest>,
) -> Result<Json<GalleryItemResponse>, ApiError> {
    let mut item = state.db().gallery().get(&id).await?;
    req.apply_to(&mut item);

    let updated = state.db().gallery().update(&item).await?;
    state.publish(UpdateMessage::updated(Entity::Gallery, &id));

    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/gallery/{id}",
    tag = "gallery",
    params(("id" = String, Path, description = "Gallery item ID")),
    responses(
        (status = 200, description = "Gallery item deleted", body = SuccessResponse),
        (status = 404, description = "Gallery item not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_gallery_item<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state.db().gallery().delete(&id).await?;
    state.publish(UpdateMessage::deleted(Entity::Gallery, &id));

    Ok(Json(SuccessResponse::ok()))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/gallery/{id}/toggle-active",
    tag = "gallery",
    params(("id" = String, Path, description = "Gallery item ID")),
    responses(
        (status = 200, description = "Active flag flipped", body = GalleryItemResponse),
        (status = 404, description = "Gallery item not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn toggle_gallery_active<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<Json<GalleryItemResponse>, ApiError> {
    let item = state.db().gallery().toggle_active(&id).await?;
    state.publish(UpdateMessage::updated(Entity::Gallery, &id));

    Ok(Json(item.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/gallery/{id}/toggle-featured",
    tag = "gallery",
    params(("id" = String, Path, description = "Gallery item ID")),
    responses(
        (status = 200, description = "Featured flag flipped", body = GalleryItemResponse),
        (status = 404, description = "Gallery item not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn toggle_gallery_featured<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<Json<GalleryItemResponse>, ApiError> {
    let item = state.db().gallery().toggle_featured(&id).await?;
    state.publish(UpdateMessage::updated(Entity::Gallery, &id));

    Ok(Json(item.into()))
}
