//! FAQ handlers.

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
use crate::db::{Database, Faq, FaqRepository};
use crate::table::{self, TablePage, TableQuery};

use super::{CatalogParams, SuccessResponse, default_true};

// =============================================================================
// DTOs
// =============================================================================

#[derive(Serialize, ToSchema)]
pub struct FaqResponse {
    #[schema(example = "a1b2c3d4")]
    pub id: String,
    #[schema(example = "Сколько длится пошив?")]
    pub question: String,
    /// Markdown
    #[schema(example = "Обычно **2-3 недели**.")]
    pub answer: String,
    pub category: Option<String>,
    pub active: bool,
    pub order: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Faq> for FaqResponse {
    fn from(f: Faq) -> Self {
        Self {
            id: f.id,
            question: f.question,
            answer: f.answer,
            category: f.category,
            active: f.active,
            order: f.order,
            created_at: f.created_at,
            updated_at: f.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct FaqRequest {
    pub question: String,
    pub answer: String,
    pub category: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub order: i64,
}

#[derive(Serialize, ToSchema)]
pub struct PaginatedFaqs {
    pub items: Vec<FaqResponse>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
}

impl From<TablePage<Faq>> for PaginatedFaqs {
    fn from(page: TablePage<Faq>) -> Self {
        let page = page.map(FaqResponse::from);
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
    path = "/api/v1/admin/faqs",
    tag = "faqs",
    params(TableQuery, CatalogParams),
    responses(
        (status = 200, description = "Paginated FAQs", body = PaginatedFaqs),
        (status = 401, description = "Not logged in", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_faqs<D: Database>(
    State(state): State<AppState<D>>,
    Query(table_query): Query<TableQuery>,
    Query(params): Query<CatalogParams>,
) -> Result<Json<PaginatedFaqs>, ApiError> {
    let faqs = state.db().faqs().list(&params.to_query()).await?;
    Ok(Json(table::apply(faqs, &table_query).into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/faqs/{id}",
    tag = "faqs",
    params(("id" = String, Path, description = "FAQ ID")),
    responses(
        (status = 200, description = "FAQ found", body = FaqResponse),
        (status = 404, description = "FAQ not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_faq<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<Json<FaqResponse>, ApiError> {
    let faq = state.db().faqs().get(&id).await?;
    Ok(Json(faq.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/faqs",
    tag = "faqs",
    request_body = FaqRequest,
    responses(
        (status = 201, description = "FAQ created", body = FaqResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_faq<D: Database>(
    State(state): State<AppState<D>>,
    Json(req): Json<FaqRequest>,
) -> Result<(StatusCode, Json<FaqResponse>), ApiError> {
    let faq = Faq {
        id: String::new(),
        question: req.question,
        answer: req.answer,
        category: req.category,
        active: req.active,
        order: req.order,
        created_at: String::new(),
        updated_at: String::new(),
    };

    let created = state.db().faqs().create(&faq).await?;
    state.publish(UpdateMessage::created(Entity::Faq, &created.id));

    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/faqs/{id}",
    tag = "faqs",
    params(("id" = String, Path, description = "FAQ ID")),
    request_body = FaqRequest,
    responses(
        (status = 200, description = "FAQ updated", body = FaqResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "FAQ not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_faq<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
    Json(req): Json<FaqRequest>,
) -> Result<Json<FaqResponse>, ApiError> {
    let mut faq = state.db().faqs().get(&id).await?;
    faq.question = req.question;
    faq.answer = req.answer;
    faq.category = req.category;
    faq.active = req.active;
    faq.order = req.order;

    let updated = state.db().faqs().update(&faq).await?;
    state.publish(UpdateMessage::updated(Entity::Faq, &id));

    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/faqs/{id}",
    tag = "faqs",
    params(("id" = String, Path, description = "FAQ ID")),
    responses(
        (status = 200, description = "FAQ deleted", body = SuccessResponse),
        (status = 404, description = "FAQ not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_faq<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state.db().faqs().delete(&id).await?;
    state.publish(UpdateMessage::deleted(Entity::Faq, &id));

    Ok(Json(SuccessResponse::ok()))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/faqs/{id}/toggle-active",
    tag = "faqs",
    params(("id" = String, Path, description = "FAQ ID")),
    responses(
        (status = 200, description = "Active flag flipped", body = FaqResponse),
        (status = 404, description = "FAQ not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn toggle_faq_active<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<Json<FaqResponse>, ApiError> {
    let faq = state.db().faqs().toggle_active(&id).await?;
    state.publish(UpdateMessage::updated(Entity::Faq, &id));

    Ok(Json(faq.into()))
}
