//! Calendar event handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::{IntoParams, ToSchema};

use crate::api::AppState;
use crate::api::error::{ApiError, ErrorResponse};
use crate::api::notifier::{Entity, UpdateMessage};
use crate::calendar::{self, DayCell};
use crate::db::utils::now_naive;
use crate::db::{Database, Event, EventQuery, EventRepository, EventStatus, EventType};
use crate::table::{self, TablePage, TableQuery};

use super::{SuccessResponse, parse_field};

// =============================================================================
// DTOs
// =============================================================================

#[derive(Serialize, ToSchema)]
pub struct EventResponse {
    #[schema(example = "a1b2c3d4")]
    pub id: String,
    #[schema(example = "Примерка пальто")]
    pub title: String,
    pub description: Option<String>,
    #[schema(example = "fitting")]
    pub event_type: String,
    #[schema(example = "scheduled")]
    pub status: String,
    #[schema(example = "2025-03-10T14:00:00")]
    pub start_at: NaiveDateTime,
    pub end_at: Option<NaiveDateTime>,
    pub all_day: bool,
    pub location: Option<String>,
    pub contact_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Event> for EventResponse {
    fn from(e: Event) -> Self {
        Self {
            id: e.id,
            title: e.title,
            description: e.description,
            event_type: e.event_type.to_string(),
            status: e.status.to_string(),
            start_at: e.start_at,
            end_at: e.end_at,
            all_day: e.all_day,
            location: e.location,
            contact_id: e.contact_id,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

/// Body for creating or replacing an event.
#[derive(Debug, Deserialize, ToSchema)]
pub struct EventRequest {
    #[schema(example = "Примерка пальто")]
    pub title: String,
    pub description: Option<String>,
    /// fitting, consultation, delivery, other
    #[schema(example = "fitting")]
    pub event_type: Option<String>,
    /// scheduled, completed, cancelled
    #[schema(example = "scheduled")]
    pub status: Option<String>,
    #[schema(example = "2025-03-10T14:00:00")]
    pub start_at: NaiveDateTime,
    pub end_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub all_day: bool,
    pub location: Option<String>,
    pub contact_id: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct EventFilter {
    /// Events starting on or after this day
    #[param(example = "2025-03-01")]
    pub from: Option<NaiveDate>,
    /// Events starting on or before this day
    #[param(example = "2025-03-31")]
    pub to: Option<NaiveDate>,
    /// Filter by status
    #[param(example = "scheduled")]
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct CalendarQuery {
    /// Defaults to the current year
    #[param(example = 2025)]
    pub year: Option<i32>,
    /// 1-12, defaults to the current month
    #[param(example = 3)]
    pub month: Option<u32>,
}

#[derive(Serialize, ToSchema)]
pub struct PaginatedEvents {
    pub items: Vec<EventResponse>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
}

impl From<TablePage<Event>> for PaginatedEvents {
    fn from(page: TablePage<Event>) -> Self {
        let page = page.map(EventResponse::from);
        Self {
            items: page.items,
            total: page.total,
            page: page.page,
            per_page: page.per_page,
            total_pages: page.total_pages,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct MonthRef {
    pub year: i32,
    pub month: u32,
}

#[derive(Serialize, ToSchema)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub in_month: bool,
    pub is_today: bool,
    pub events: Vec<EventResponse>,
}

impl From<DayCell<Event>> for CalendarDay {
    fn from(cell: DayCell<Event>) -> Self {
        Self {
            date: cell.date,
            in_month: cell.in_month,
            is_today: cell.is_today,
            events: cell.entries.into_iter().map(EventResponse::from).collect(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct CalendarResponse {
    pub year: i32,
    pub month: u32,
    #[schema(example = "Март")]
    pub title: String,
    pub prev: MonthRef,
    pub next: MonthRef,
    /// Always 42 days, Monday first
    pub days: Vec<CalendarDay>,
}

fn parse_type(value: &str) -> Result<EventType, ApiError> {
    parse_field(value, "Некорректный тип события")
}

fn parse_status(value: &str) -> Result<EventStatus, ApiError> {
    parse_field(value, "Некорректный статус события")
}

fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(23, 59, 59)
        .unwrap_or_else(|| start_of_day(date))
}

// =============================================================================
// Handlers
// =============================================================================

#[utoipa::path(
    get,
    path = "/api/v1/admin/events",
    tag = "events",
    params(TableQuery, EventFilter),
    responses(
        (status = 200, description = "Paginated events, by start time", body = PaginatedEvents),
        (status = 401, description = "Not logged in", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_events<D: Database>(
    State(state): State<AppState<D>>,
    Query(table_query): Query<TableQuery>,
    Query(filter): Query<EventFilter>,
) -> Result<Json<PaginatedEvents>, ApiError> {
    let query = EventQuery {
        from: filter.from.map(start_of_day),
        to: filter.to.map(end_of_day),
        status: filter
            .status
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(parse_status)
            .transpose()?,
    };

    let events = state.db().events().list(&query).await?;
    Ok(Json(table::apply(events, &table_query).into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/events/calendar",
    tag = "events",
    params(CalendarQuery),
    responses(
        (status = 200, description = "42-day month grid", body = CalendarResponse),
        (status = 400, description = "Invalid month", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn event_calendar<D: Database>(
    State(state): State<AppState<D>>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarResponse>, ApiError> {
    let today = now_naive().date();
    let year = query.year.unwrap_or(today.year());
    let month = query.month.unwrap_or(today.month());

    let (from, to) = calendar::grid_bounds(year, month)
        .ok_or_else(|| ApiError::validation("Некорректный месяц"))?;

    let events = state
        .db()
        .events()
        .list(&EventQuery {
            from: Some(from),
            to: Some(to),
            status: None,
        })
        .await?;

    let grid = calendar::month_grid(year, month, today, events)
        .ok_or_else(|| ApiError::validation("Некорректный месяц"))?;
    let (prev_year, prev_month) = calendar::prev_month(year, month);
    let (next_year, next_month) = calendar::next_month(year, month);

    Ok(Json(CalendarResponse {
        year,
        month,
        title: grid.title().to_string(),
        prev: MonthRef {
            year: prev_year,
            month: prev_month,
        },
        next: MonthRef {
            year: next_year,
            month: next_month,
        },
        days: grid.cells.into_iter().map(CalendarDay::from).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/events/{id}",
    tag = "events",
    params(("id" = String, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event found", body = EventResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_event<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<Json<EventResponse>, ApiError> {
    let event = state.db().events().get(&id).await?;
    Ok(Json(event.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/events",
    tag = "events",
    request_body = EventRequest,
    responses(
        (status = 201, description = "Event created", body = EventResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_event<D: Database>(
    State(state): State<AppState<D>>,
    Json(req): Json<EventRequest>,
) -> Result<(StatusCode, Json<EventResponse>), ApiError> {
    let event = Event {
        id: String::new(),
        title: req.title,
        description: req.description,
        event_type: req.event_type.as_deref().map(parse_type).transpose()?.unwrap_or_default(),
        status: req.status.as_deref().map(parse_status).transpose()?.unwrap_or_default(),
        start_at: req.start_at,
        end_at: req.end_at,
        all_day: req.all_day,
        location: req.location,
        contact_id: req.contact_id,
        created_at: String::new(),
        updated_at: String::new(),
    };

    let created = state.db().events().create(&event).await?;
    state.publish(UpdateMessage::created(Entity::Event, &created.id));

    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/events/{id}",
    tag = "events",
    params(("id" = String, Path, description = "Event ID")),
    request_body = EventRequest,
    responses(
        (status = 200, description = "Event updated", body = EventResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_event<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
    Json(req): Json<EventRequest>,
) -> Result<Json<EventResponse>, ApiError> {
    let mut event = state.db().events().get(&id).await?;

    event.title = req.title;
    event.description = req.description;
    if let Some(event_type) = req.event_type.as_deref() {
        event.event_type = parse_type(event_type)?;
    }
    if let Some(status) = req.status.as_deref() {
        event.status = parse_status(status)?;
    }
    event.start_at = req.start_at;
    event.end_at = req.end_at;
    event.all_day = req.all_day;
    event.location = req.location;
    event.contact_id = req.contact_id;

    let updated = state.db().events().update(&event).await?;
    state.publish(UpdateMessage::updated(Entity::Event, &id));

    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/events/{id}",
    tag = "events",
    params(("id" = String, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event deleted", body = SuccessResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_event<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state.db().events().delete(&id).await?;
    state.publish(UpdateMessage::deleted(Entity::Event, &id));

    Ok(Json(SuccessResponse::ok()))
}
