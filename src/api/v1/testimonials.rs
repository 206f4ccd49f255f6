//! Testimonial handlers.

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
use crate::db::{Database, Testimonial, TestimonialRepository};
use crate::table::{self, TablePage, TableQuery};

use super::{CatalogParams, SuccessResponse, default_true};

// =============================================================================
// DTOs
// =============================================================================

#[derive(Serialize, ToSchema)]
pub struct TestimonialResponse {
    #[schema(example = "a1b2c3d4")]
    pub id: String,
    #[schema(example = "Мария")]
    pub client_name: String,
    pub content: String,
    #[schema(example = 5)]
    pub rating: i64,
    pub service_id: Option<String>,
    pub image_url: Option<String>,
    pub featured: bool,
    pub active: bool,
    pub order: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Testimonial> for TestimonialResponse {
    fn from(t: Testimonial) -> Self {
        Self {
            id: t.id,
            client_name: t.client_name,
            content: t.content,
            rating: t.rating,
            service_id: t.service_id,
            image_url: t.image_url,
            featured: t.featured,
            active: t.active,
            order: t.order,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

fn default_rating() -> i64 {
    5
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TestimonialRequest {
    pub client_name: String,
    pub content: String,
    /// 1 to 5
    #[serde(default = "default_rating")]
    pub rating: i64,
    pub service_id: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub order: i64,
}

impl TestimonialRequest {
    fn apply_to(self, testimonial: &mut Testimonial) {
        testimonial.client_name = self.client_name;
        testimonial.content = self.content;
        testimonial.rating = self.rating;
        testimonial.service_id = self.service_id;
        testimonial.image_url = self.image_url;
        testimonial.featured = self.featured;
        testimonial.active = self.active;
        testimonial.order = self.order;
    }
}

#[derive(Serialize, ToSchema)]
pub struct PaginatedTestimonials {
    pub items: Vec<TestimonialResponse>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
}

impl From<TablePage<Testimonial>> for PaginatedTestimonials {
    fn from(page: TablePage<Testimonial>) -> Self {
        let page = page.map(TestimonialResponse::from);
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
    path = "/api/v1/admin/testimonials",
    tag = "testimonials",
    params(TableQuery, CatalogParams),
    responses(
        (status = 200, description = "Paginated testimonials", body = PaginatedTestimonials),
        (status = 401, description = "Not logged in", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_testimonials<D: Database>(
    State(state): State<AppState<D>>,
    Query(table_query): Query<TableQuery>,
    Query(params): Query<CatalogParams>,
) -> Result<Json<PaginatedTestimonials>, ApiError> {
    let testimonials = state.db().testimonials().list(&params.to_query()).await?;
    Ok(Json(table::apply(testimonials, &table_query).into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/testimonials/{id}",
    tag = "testimonials",
    params(("id" = String, Path, description = "Testimonial ID")),
    responses(
        (status = 200, description = "Testimonial found", body = TestimonialResponse),
        (status = 404, description = "Testimonial not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_testimonial<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<Json<TestimonialResponse>, ApiError> {
    let testimonial = state.db().testimonials().get(&id).await?;
    Ok(Json(testimonial.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/testimonials",
    tag = "testimonials",
    request_body = TestimonialRequest,
    responses(
        (status = 201, description = "Testimonial created", body = TestimonialResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_testimonial<D: Database>(
    State(state): State<AppState<D>>,
    Json(req): Json<TestimonialRequest>,
) -> Result<(StatusCode, Json<TestimonialResponse>), ApiError> {
    let mut testimonial = Testimonial {
        id: String::new(),
        client_name: String::new(),
        content: String::new(),
        rating: default_rating(),
        service_id: None,
        image_url: None,
        featured: false,
        active: true,
        order: 0,
        created_at: String::new(),
        updated_at: String::new(),
    };
    req.apply_to(&mut testimonial);

    let created = state.db().testimonials().create(&testimonial).await?;
    state.publish(UpdateMessage::created(Entity::Testimonial, &created.id));

    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/testimonials/{id}",
    tag = "testimonials",
    params(("id" = String, Path, description = "Testimonial ID")),
    request_body = TestimonialRequest,
    responses(
        (status = 200, description = "Testimonial updated", body = TestimonialResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Testimonial not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_testimonial<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
    Json(req): Json<TestimonialRequest>,
) -> Result<Json<TestimonialResponse>, ApiError> {
    let mut testimonial = state.db().testimonials().get(&id).await?;
    req.apply_to(&mut testimonial);

    let updated = state.db().testimonials().update(&testimonial).await?;
    state.publish(UpdateMessage::updated(Entity::Testimonial, &id));

    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/testimonials/{id}",
    tag = "testimonials",
    params(("id" = String, Path, description = "Testimonial ID")),
    responses(
        (status = 200, description = "Testimonial deleted", body = SuccessResponse),
        (status = 404, description = "Testimonial not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_testimonial<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state.db().testimonials().delete(&id).await?;
    state.publish(UpdateMessage::deleted(Entity::Testimonial, &id));

    Ok(Json(SuccessResponse::ok()))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/testimonials/{id}/toggle-active",
    tag = "testimonials",
    params(("id" = String, Path, description = "Testimonial ID")),
    responses(
        (status = 200, description = "Active flag flipped", body = TestimonialResponse),
        (status = 404, description = "Testimonial not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn toggle_testimonial_active<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<Json<TestimonialResponse>, ApiError> {
    let testimonial = state.db().testimonials().toggle_active(&id).await?;
    state.publish(UpdateMessage::updated(Entity::Testimonial, &id));

    Ok(Json(testimonial.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/testimonials/{id}/toggle-featured",
    tag = "testimonials",
    params(("id" = String, Path, description = "Testimonial ID")),
    responses(
        (status = 200, description = "Featured flag flipped", body = TestimonialResponse),
        (status = 404, description = "Testimonial not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn toggle_testimonial_featured<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<Json<TestimonialResponse>, ApiError> {
    let testimonial = state.db().testimonials().toggle_featured(&id).await?;
    state.publish(UpdateMessage::updated(Entity::Testimonial, &id));

    Ok(Json(testimonial.into()))
}
