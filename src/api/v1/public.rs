//! Unauthenticated JSON endpoints used by the public site.
//!
//! Listings only ever return active rows.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::{IntoParams, ToSchema};

use crate::api::AppState;
use crate::api::error::{ApiError, ErrorResponse};
use crate::api::notifier::{Entity, UpdateMessage};
use crate::db::{
    CatalogQuery, Contact, ContactRepository, ContactStatus, Database, FabricRepository,
    FaqRepository, GalleryRepository, ServiceRepository, TestimonialRepository,
};

use super::{
    FabricResponse, FaqResponse, GalleryItemResponse, ServiceResponse, TestimonialResponse,
};

/// Contact form submission.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ContactFormRequest {
    #[schema(example = "Анна Иванова")]
    pub name: String,
    #[schema(example = "anna@example.com")]
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    #[schema(example = "Хочу сшить пальто к зиме")]
    pub message: String,
    pub service_id: Option<String>,
}

impl ContactFormRequest {
    /// New contact with status `new`. Blank optional fields are dropped.
    pub fn into_contact(self) -> Contact {
        fn non_blank(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Contact {
            id: String::new(),
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: non_blank(self.phone),
            subject: non_blank(self.subject),
            message: self.message.trim().to_string(),
            service_id: non_blank(self.service_id),
            status: ContactStatus::New,
            notes: None,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct ContactFormResponse {
    #[schema(example = true)]
    pub success: bool,
    #[schema(example = "a1b2c3d4")]
    pub id: String,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct CategoryFilter {
    /// Only this category
    #[param(example = "coats")]
    pub category: Option<String>,
}

impl CategoryFilter {
    fn to_query(&self) -> CatalogQuery {
        CatalogQuery {
            category: self.category.clone(),
            ..CatalogQuery::public()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/contact",
    tag = "public",
    request_body = ContactFormRequest,
    responses(
        (status = 201, description = "Request received", body = ContactFormResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn submit_contact<D: Database>(
    State(state): State<AppState<D>>,
    Json(req): Json<ContactFormRequest>,
) -> Result<(StatusCode, Json<ContactFormResponse>), ApiError> {
    let created = state.db().contacts().create(&req.into_contact()).await?;
    info!(id = %created.id, "Contact request received");
    state.publish(UpdateMessage::created(Entity::Contact, &created.id));

    Ok((
        StatusCode::CREATED,
        Json(ContactFormResponse {
            success: true,
            id: created.id,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/public/services",
    tag = "public",
    responses((status = 200, description = "Active services", body = Vec<ServiceResponse>))
)]
#[instrument(skip(state))]
pub async fn public_services<D: Database>(
    State(state): State<AppState<D>>,
) -> Result<Json<Vec<ServiceResponse>>, ApiError> {
    let services = state.db().services().list(&CatalogQuery::public()).await?;
    Ok(Json(services.into_iter().map(ServiceResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/public/gallery",
    tag = "public",
    params(CategoryFilter),
    responses((status = 200, description = "Active gallery items", body = Vec<GalleryItemResponse>))
)]
#[instrument(skip(state))]
pub async fn public_gallery<D: Database>(
    State(state): State<AppState<D>>,
    Query(filter): Query<CategoryFilter>,
) -> Result<Json<Vec<GalleryItemResponse>>, ApiError> {
    let items = state.db().gallery().list(&filter.to_query()).await?;
    Ok(Json(items.into_iter().map(GalleryItemResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/public/fabrics",
    tag = "public",
    params(CategoryFilter),
    responses((status = 200, description = "Active fabrics", body = Vec<FabricResponse>))
)]
#[instrument(skip(state))]
pub async fn public_fabrics<D: Database>(
    State(state): State<AppState<D>>,
    Query(filter): Query<CategoryFilter>,
) -> Result<Json<Vec<FabricResponse>>, ApiError> {
    let fabrics = state.db().fabrics().list(&filter.to_query()).await?;
    Ok(Json(fabrics.into_iter().map(FabricResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/public/testimonials",
    tag = "public",
    responses((status = 200, description = "Active testimonials", body = Vec<TestimonialResponse>))
)]
#[instrument(skip(state))]
pub async fn public_testimonials<D: Database>(
    State(state): State<AppState<D>>,
) -> Result<Json<Vec<TestimonialResponse>>, ApiError> {
    let testimonials = state
        .db()
        .testimonials()
        .list(&CatalogQuery::public())
        .await?;
    Ok(Json(
        testimonials
            .into_iter()
            .map(TestimonialResponse::from)
            .collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/public/faqs",
    tag = "public",
    responses((status = 200, description = "Active FAQs", body = Vec<FaqResponse>))
)]
#[instrument(skip(state))]
pub async fn public_faqs<D: Database>(
    State(state): State<AppState<D>>,
) -> Result<Json<Vec<FaqResponse>>, ApiError> {
    let faqs = state.db().faqs().list(&CatalogQuery::public()).await?;
    Ok(Json(faqs.into_iter().map(FaqResponse::from).collect()))
}
