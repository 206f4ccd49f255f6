//! Contact request handlers (admin inbox).

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::{IntoParams, ToSchema};

use crate::api::AppState;
use crate::api::error::{ApiError, ErrorResponse};
use crate::api::notifier::{Entity, UpdateMessage};
use crate::db::{Contact, ContactQuery, ContactRepository, ContactStatus, Database};
use crate::table::{self, TablePage, TableQuery};

use super::{SuccessResponse, parse_field};

// =============================================================================
// DTOs
// =============================================================================

#[derive(Serialize, ToSchema)]
pub struct ContactResponse {
    #[schema(example = "a1b2c3d4")]
    pub id: String,
    #[schema(example = "Анна Иванова")]
    pub name: String,
    #[schema(example = "anna@example.com")]
    pub email: String,
    #[schema(example = "+7 900 123-45-67")]
    pub phone: Option<String>,
    pub subject: Option<String>,
    #[schema(example = "Хочу сшить пальто к зиме")]
    pub message: String,
    pub service_id: Option<String>,
    #[schema(example = "new")]
    pub status: String,
    /// Internal notes
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Contact> for ContactResponse {
    fn from(c: Contact) -> Self {
        Self {
            id: c.id,
            name: c.name,
            email: c.email,
            phone: c.phone,
            subject: c.subject,
            message: c.message,
            service_id: c.service_id,
            status: c.status.to_string(),
            notes: c.notes,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Body for creating or replacing a contact.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ContactRequest {
    #[schema(example = "Анна Иванова")]
    pub name: String,
    #[schema(example = "anna@example.com")]
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    pub service_id: Option<String>,
    /// new, in_progress, completed, archived
    #[schema(example = "in_progress")]
    pub status: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ContactStatusRequest {
    #[schema(example = "completed")]
    pub status: String,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ContactFilter {
    /// Filter by status
    #[param(example = "new")]
    pub status: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct PaginatedContacts {
    pub items: Vec<ContactResponse>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
}

impl From<TablePage<Contact>> for PaginatedContacts {
    fn from(page: TablePage<Contact>) -> Self {
        let page = page.map(ContactResponse::from);
        Self {
            items: page.items,
            total: page.total,
            page: page.page,
            per_page: page.per_page,
            total_pages: page.total_pages,
        }
    }
}

fn parse_status(value: &str) -> Result<ContactStatus, ApiError> {
    parse_field(value, "Некорректный статус заявки")
}

// =============================================================================
// Handlers
// =============================================================================

#[utoipa::path(
    get,
    path = "/api/v1/admin/contacts",
    tag = "contacts",
    params(TableQuery, ContactFilter),
    responses(
        (status = 200, description = "Paginated contacts, newest first", body = PaginatedContacts),
        (status = 401, description = "Not logged in", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_contacts<D: Database>(
    State(state): State<AppState<D>>,
    Query(table_query): Query<TableQuery>,
    Query(filter): Query<ContactFilter>,
) -> Result<Json<PaginatedContacts>, ApiError> {
    let status = filter
        .status
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(parse_status)
        .transpose()?;

    let contacts = state
        .db()
        .contacts()
        .list(&ContactQuery { status })
        .await?;

    Ok(Json(table::apply(contacts, &table_query).into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/contacts/{id}",
    tag = "contacts",
    params(("id" = String, Path, description = "Contact ID")),
    responses(
        (status = 200, description = "Contact found", body = ContactResponse),
        (status = 404, description = "Contact not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_contact<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<Json<ContactResponse>, ApiError> {
    let contact = state.db().contacts().get(&id).await?;
    Ok(Json(contact.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/contacts",
    tag = "contacts",
    request_body = ContactRequest,
    responses(
        (status = 201, description = "Contact created", body = ContactResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_contact<D: Database>(
    State(state): State<AppState<D>>,
    Json(req): Json<ContactRequest>,
) -> Result<(StatusCode, Json<ContactResponse>), ApiError> {
    let status = match req.status.as_deref() {
        Some(s) => parse_status(s)?,
        None => ContactStatus::New,
    };

    let contact = Contact {
        id: String::new(),
        name: req.name,
        email: req.email,
        phone: req.phone,
        subject: req.subject,
        message: req.message,
        service_id: req.service_id,
        status,
        notes: req.notes,
        created_at: String::new(),
        updated_at: String::new(),
    };

    let created = state.db().contacts().create(&contact).await?;
    state.publish(UpdateMessage::created(Entity::Contact, &created.id));

    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/contacts/{id}",
    tag = "contacts",
    params(("id" = String, Path, description = "Contact ID")),
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Contact updated", body = ContactResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Contact not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_contact<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
    Json(req): Json<ContactRequest>,
) -> Result<Json<ContactResponse>, ApiError> {
    let mut contact = state.db().contacts().get(&id).await?;

    contact.name = req.name;
    contact.email = req.email;
    contact.phone = req.phone;
    contact.subject = req.subject;
    contact.message = req.message;
    contact.service_id = req.service_id;
    contact.notes = req.notes;
    if let Some(status) = req.status.as_deref() {
        contact.status = parse_status(status)?;
    }

    let updated = state.db().contacts().update(&contact).await?;
    state.publish(UpdateMessage::updated(Entity::Contact, &id));

    Ok(Json(updated.into()))
}

#[utoipa::path(
    patch,
    path = "/api/v1/admin/contacts/{id}/status",
    tag = "contacts",
    params(("id" = String, Path, description = "Contact ID")),
    request_body = ContactStatusRequest,
    responses(
        (status = 200, description = "Status changed", body = ContactResponse),
        (status = 400, description = "Unknown status", body = ErrorResponse),
        (status = 404, description = "Contact not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn set_contact_status<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
    Json(req): Json<ContactStatusRequest>,
) -> Result<Json<ContactResponse>, ApiError> {
    let status = parse_status(&req.status)?;
    let contact = state.db().contacts().set_status(&id, status).await?;
    state.publish(UpdateMessage::updated(Entity::Contact, &id));

    Ok(Json(contact.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/contacts/{id}",
    tag = "contacts",
    params(("id" = String, Path, description = "Contact ID")),
    responses(
        (status = 200, description = "Contact deleted", body = SuccessResponse),
        (status = 404, description = "Contact not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_contact<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state.db().contacts().delete(&id).await?;
    state.publish(UpdateMessage::deleted(Entity::Contact, &id));

    Ok(Json(SuccessResponse::ok()))
}
