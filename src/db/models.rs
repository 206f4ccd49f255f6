//! Domain models for the atelier database.
//!
//! These models are storage-agnostic and represent the core entities
//! used throughout the application.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// =============================================================================
// Query Types for Filtering
// =============================================================================

/// Query for contacts (admin inbox).
#[derive(Debug, Clone, Default)]
pub struct ContactQuery {
    /// Filter by status.
    pub status: Option<ContactStatus>,
}

/// Query for calendar events.
#[derive(Debug, Clone, Default)]
pub struct EventQuery {
    /// Only events starting at or after this instant.
    pub from: Option<NaiveDateTime>,
    /// Only events starting at or before this instant.
    pub to: Option<NaiveDateTime>,
    /// Filter by status.
    pub status: Option<EventStatus>,
}

/// Query shared by the catalog-like content (fabrics, FAQs, gallery,
/// services, testimonials).
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    /// Filter by category (ignored by entities without a category).
    pub category: Option<String>,
    /// Only rows with `active = true`.
    pub active_only: bool,
    /// Only rows with `featured = true` (ignored by entities without the flag).
    pub featured_only: bool,
    /// Maximum number of rows.
    pub limit: Option<usize>,
}

impl CatalogQuery {
    /// Query used by the public site: active rows only.
    pub fn public() -> Self {
        Self {
            active_only: true,
            ..Default::default()
        }
    }

    /// Active and featured rows, optionally capped.
    pub fn featured(limit: Option<usize>) -> Self {
        Self {
            active_only: true,
            featured_only: true,
            limit,
            ..Default::default()
        }
    }
}

/// 8-character hex ID type used for all entities.
pub type Id = String;

// =============================================================================
// Accounts
// =============================================================================

/// An admin panel account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Id,
    pub email: String,
    pub name: String,
    /// Argon2 PHC string. Never serialized.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A logged-in admin session. Only the hash of the cookie token is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token_hash: String,
    pub user_id: Id,
    pub created_at: String,
    pub expires_at: String,
}

// =============================================================================
// Contacts
// =============================================================================

/// A request submitted through the public contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: Id,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    /// Service the client asked about.
    pub service_id: Option<Id>,
    pub status: ContactStatus,
    /// Internal notes, never shown publicly.
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Processing status of a contact request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContactStatus {
    #[default]
    New,
    InProgress,
    Completed,
    Archived,
}

impl ContactStatus {
    pub const ALL: [ContactStatus; 4] = [
        ContactStatus::New,
        ContactStatus::InProgress,
        ContactStatus::Completed,
        ContactStatus::Archived,
    ];
}

impl std::fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ContactStatus::New => "new",
            ContactStatus::InProgress => "in_progress",
            ContactStatus::Completed => "completed",
            ContactStatus::Archived => "archived",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for ContactStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(ContactStatus::New),
            "in_progress" => Ok(ContactStatus::InProgress),
            "completed" => Ok(ContactStatus::Completed),
            "archived" => Ok(ContactStatus::Archived),
            _ => Err(format!("Invalid contact status: {}", s)),
        }
    }
}

// =============================================================================
// Events
// =============================================================================

/// A calendar entry: fitting, consultation, delivery...
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: Id,
    pub title: String,
    pub description: Option<String>,
    pub event_type: EventType,
    pub status: EventStatus,
    pub start_at: NaiveDateTime,
    pub end_at: Option<NaiveDateTime>,
    pub all_day: bool,
    pub location: Option<String>,
    /// Client contact this appointment belongs to.
    pub contact_id: Option<Id>,
    pub created_at: String,
    pub updated_at: String,
}

impl Event {
    /// Calendar day the event is filed under.
    pub fn start_date(&self) -> NaiveDate {
        self.start_at.date()
    }
}

/// Kind of appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Fitting,
    Consultation,
    Delivery,
    #[default]
    Other,
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EventType::Fitting => "fitting",
            EventType::Consultation => "consultation",
            EventType::Delivery => "delivery",
            EventType::Other => "other",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fitting" => Ok(EventType::Fitting),
            "consultation" => Ok(EventType::Consultation),
            "delivery" => Ok(EventType::Delivery),
            "other" => Ok(EventType::Other),
            _ => Err(format!("Invalid event type: {}", s)),
        }
    }
}

/// Lifecycle of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EventStatus::Scheduled => "scheduled",
            EventStatus::Completed => "completed",
            EventStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for EventStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(EventStatus::Scheduled),
            "completed" => Ok(EventStatus::Completed),
            "cancelled" => Ok(EventStatus::Cancelled),
            _ => Err(format!("Invalid event status: {}", s)),
        }
    }
}

// =============================================================================
// Catalog content
// =============================================================================

/// A fabric offered by the atelier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fabric {
    pub id: Id,
    pub name: String,
    pub description: Option<String>,
    pub composition: Option<String>,
    pub color: Option<String>,
    pub category: String,
    /// Price in whole rubles.
    pub price_per_meter: Option<i64>,
    pub image_url: Option<String>,
    pub in_stock: bool,
    pub featured: bool,
    pub active: bool,
    pub order: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// A frequently asked question. `answer` is markdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    pub id: Id,
    pub question: String,
    pub answer: String,
    pub category: Option<String>,
    pub active: bool,
    pub order: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// A finished piece shown in the gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryItem {
    pub id: Id,
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    pub category: String,
    pub tags: Vec<String>,
    /// Fabrics used for this piece.
    #[serde(default)]
    pub fabric_ids: Vec<Id>,
    pub featured: bool,
    pub active: bool,
    pub order: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// A service offered by the atelier (tailoring, alterations...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: Id,
    pub title: String,
    pub slug: String,
    pub description: String,
    /// Starting price in whole rubles.
    pub price_from: Option<i64>,
    /// Free-form turnaround, e.g. "2-3 недели".
    pub duration: Option<String>,
    pub features: Vec<String>,
    pub image_url: Option<String>,
    pub featured: bool,
    pub active: bool,
    pub order: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// A client review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: Id,
    pub client_name: String,
    pub content: String,
    /// 1..=5 stars.
    pub rating: i64,
    pub service_id: Option<Id>,
    pub image_url: Option<String>,
    pub featured: bool,
    pub active: bool,
    pub order: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// A site-wide key/value setting (site name, phone, about text...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setting {
    pub key: String,
    pub value: String,
    pub updated_at: String,
}

/// Well-known setting keys read by the public site.
pub mod setting_keys {
    pub const SITE_NAME: &str = "site_name";
    pub const HERO_TITLE: &str = "hero_title";
    pub const HERO_SUBTITLE: &str = "hero_subtitle";
    pub const ABOUT_TEXT: &str = "about_text";
    pub const CONTACT_PHONE: &str = "contact_phone";
    pub const CONTACT_EMAIL: &str = "contact_email";
    pub const CONTACT_ADDRESS: &str = "contact_address";
}
