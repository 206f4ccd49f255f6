//! Dashboard counters.

use std::collections::BTreeMap;

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

use crate::api::AppState;
use crate::api::error::{ApiError, ErrorResponse};
use crate::db::{
    CatalogQuery, ContactRepository, ContactStatus, Database, EventRepository, FabricRepository,
    GalleryRepository, ServiceRepository, TestimonialRepository, utils::now_naive,
};

#[derive(Serialize, ToSchema)]
pub struct StatsResponse {
    /// Contact requests per status, every status present
    #[schema(example = json!({"new": 3, "in_progress": 1, "completed": 10, "archived": 0}))]
    pub contacts: BTreeMap<String, usize>,
    pub total_contacts: usize,
    /// Scheduled events from now on
    pub upcoming_events: usize,
    pub active_gallery_items: usize,
    pub active_testimonials: usize,
    pub active_fabrics: usize,
    pub active_services: usize,
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/stats",
    tag = "dashboard",
    responses(
        (status = 200, description = "Dashboard counters", body = StatsResponse),
        (status = 401, description = "Not logged in", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_stats<D: Database>(
    State(state): State<AppState<D>>,
) -> Result<Json<StatsResponse>, ApiError> {
    let db = state.db();
    let by_status = db.contacts().count_by_status().await?;

    let contacts: BTreeMap<String, usize> = ContactStatus::ALL
        .iter()
        .map(|s| (s.to_string(), by_status.get(s).copied().unwrap_or(0)))
        .collect();
    let total_contacts = contacts.values().sum();

    let active = CatalogQuery::public();

    Ok(Json(StatsResponse {
        contacts,
        total_contacts,
        upcoming_events: db.events().count_upcoming(now_naive()).await?,
        active_gallery_items: db.gallery().list(&active).await?.len(),
        active_testimonials: db.testimonials().list(&active).await?.len(),
        active_fabrics: db.fabrics().list(&active).await?.len(),
        active_services: db.services().list(&active).await?.len(),
    }))
}
