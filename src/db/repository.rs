//! Repository traits for data access abstraction.
//!
//! These traits define the contract for data access, allowing different
//! storage backends to be swapped without changing business logic.
//!
//! `create` generates the id and timestamps when they are left empty and
//! returns the stored row. `update` refreshes `updated_at`. Operations on a
//! missing row fail with [`DbError::NotFound`](crate::db::DbError::NotFound).

use std::collections::HashMap;

use chrono::NaiveDateTime;

use crate::db::{
    CatalogQuery, Contact, ContactQuery, ContactStatus, DbResult, Event, EventQuery, Fabric, Faq,
    GalleryItem, Service, Session, Setting, Testimonial, User,
};

/// Repository for admin accounts.
pub trait UserRepository: Send + Sync {
    fn create(&self, user: &User) -> impl Future<Output = DbResult<User>> + Send;

    fn get(&self, id: &str) -> impl Future<Output = DbResult<User>> + Send;

    /// Look up by email (case-insensitive). `None` if no such account.
    fn get_by_email(&self, email: &str) -> impl Future<Output = DbResult<Option<User>>> + Send;

    fn list(&self) -> impl Future<Output = DbResult<Vec<User>>> + Send;

    fn update_password(
        &self,
        id: &str,
        password_hash: &str,
    ) -> impl Future<Output = DbResult<()>> + Send;

    fn delete(&self, id: &str) -> impl Future<Output = DbResult<()>> + Send;
}

/// Repository for admin sessions.
pub trait SessionRepository: Send + Sync {
    fn create(&self, session: &Session) -> impl Future<Output = DbResult<()>> + Send;

    /// Resolve an unexpired session to its user.
    fn find_user(
        &self,
        token_hash: &str,
        now: &str,
    ) -> impl Future<Output = DbResult<Option<User>>> + Send;

    /// Remove a session. Succeeds when the session is already gone.
    fn delete(&self, token_hash: &str) -> impl Future<Output = DbResult<()>> + Send;

    /// Remove every session that expired before `now`. Returns the number removed.
    fn delete_expired(&self, now: &str) -> impl Future<Output = DbResult<u64>> + Send;

    /// Remove all sessions of a user except `keep` (if given).
    fn delete_for_user(
        &self,
        user_id: &str,
        keep: Option<&str>,
    ) -> impl Future<Output = DbResult<u64>> + Send;
}

/// Repository for contact requests.
pub trait ContactRepository: Send + Sync {
    fn create(&self, contact: &Contact) -> impl Future<Output = DbResult<Contact>> + Send;

    fn get(&self, id: &str) -> impl Future<Output = DbResult<Contact>> + Send;

    /// Newest first.
    fn list(&self, query: &ContactQuery) -> impl Future<Output = DbResult<Vec<Contact>>> + Send;

    fn update(&self, contact: &Contact) -> impl Future<Output = DbResult<Contact>> + Send;

    fn set_status(
        &self,
        id: &str,
        status: ContactStatus,
    ) -> impl Future<Output = DbResult<Contact>> + Send;

    fn delete(&self, id: &str) -> impl Future<Output = DbResult<()>> + Send;

    fn count_by_status(
        &self,
    ) -> impl Future<Output = DbResult<HashMap<ContactStatus, usize>>> + Send;
}

/// Repository for calendar events.
pub trait EventRepository: Send + Sync {
    fn create(&self, event: &Event) -> impl Future<Output = DbResult<Event>> + Send;

    fn get(&self, id: &str) -> impl Future<Output = DbResult<Event>> + Send;

    /// Ordered by start time.
    fn list(&self, query: &EventQuery) -> impl Future<Output = DbResult<Vec<Event>>> + Send;

    fn update(&self, event: &Event) -> impl Future<Output = DbResult<Event>> + Send;

    fn delete(&self, id: &str) -> impl Future<Output = DbResult<()>> + Send;

    /// Scheduled events starting at or after `now`.
    fn count_upcoming(&self, now: NaiveDateTime) -> impl Future<Output = DbResult<usize>> + Send;
}

/// Repository for fabrics.
pub trait FabricRepository: Send + Sync {
    fn create(&self, fabric: &Fabric) -> impl Future<Output = DbResult<Fabric>> + Send;

    fn get(&self, id: &str) -> impl Future<Output = DbResult<Fabric>> + Send;

    /// Ordered by `order`, then name.
    fn list(&self, query: &CatalogQuery) -> impl Future<Output = DbResult<Vec<Fabric>>> + Send;

    fn update(&self, fabric: &Fabric) -> impl Future<Output = DbResult<Fabric>> + Send;

    fn delete(&self, id: &str) -> impl Future<Output = DbResult<()>> + Send;

    fn toggle_active(&self, id: &str) -> impl Future<Output = DbResult<Fabric>> + Send;

    fn toggle_featured(&self, id: &str) -> impl Future<Output = DbResult<Fabric>> + Send;

    /// Distinct categories of active fabrics, sorted.
    fn categories(&self) -> impl Future<Output = DbResult<Vec<String>>> + Send;
}

/// Repository for FAQ entries.
pub trait FaqRepository: Send + Sync {
    fn create(&self, faq: &Faq) -> impl Future<Output = DbResult<Faq>> + Send;

    fn get(&self, id: &str) -> impl Future<Output = DbResult<Faq>> + Send;

    /// Ordered by `order`.
    fn list(&self, query: &CatalogQuery) -> impl Future<Output = DbResult<Vec<Faq>>> + Send;

    fn update(&self, faq: &Faq) -> impl Future<Output = DbResult<Faq>> + Send;

    fn delete(&self, id: &str) -> impl Future<Output = DbResult<()>> + Send;

    fn toggle_active(&self, id: &str) -> impl Future<Output = DbResult<Faq>> + Send;
}

/// Repository for gallery items.
pub trait GalleryRepository: Send + Sync {
    fn create(&self, item: &GalleryItem) -> impl Future<Output = DbResult<GalleryItem>> + Send;

    fn get(&self, id: &str) -> impl Future<Output = DbResult<GalleryItem>> + Send;

    /// Ordered by `order`, then newest first.
    fn list(
        &self,
        query: &CatalogQuery,
    ) -> impl Future<Output = DbResult<Vec<GalleryItem>>> + Send;

    fn update(&self, item: &GalleryItem) -> impl Future<Output = DbResult<GalleryItem>> + Send;

    fn delete(&self, id: &str) -> impl Future<Output = DbResult<()>> + Send;

    fn toggle_active(&self, id: &str) -> impl Future<Output = DbResult<GalleryItem>> + Send;

    fn toggle_featured(&self, id: &str) -> impl Future<Output = DbResult<GalleryItem>> + Send;

    /// Assign new `order` values in one transaction. Any unknown id aborts
    /// the whole batch.
    fn reorder(&self, orders: &[(String, i64)]) -> impl Future<Output = DbResult<()>> + Send;

    /// Distinct categories of active items, sorted.
    fn categories(&self) -> impl Future<Output = DbResult<Vec<String>>> + Send;
}

/// Repository for services.
pub trait ServiceRepository: Send + Sync {
    fn create(&self, service: &Service) -> impl Future<Output = DbResult<Service>> + Send;

    fn get(&self, id: &str) -> impl Future<Output = DbResult<Service>> + Send;

    fn get_by_slug(&self, slug: &str) -> impl Future<Output = DbResult<Service>> + Send;

    /// Ordered by `order`, then title.
    fn list(&self, query: &CatalogQuery) -> impl Future<Output = DbResult<Vec<Service>>> + Send;

    fn update(&self, service: &Service) -> impl Future<Output = DbResult<Service>> + Send;

    fn delete(&self, id: &str) -> impl Future<Output = DbResult<()>> + Send;

    fn toggle_active(&self, id: &str) -> impl Future<Output = DbResult<Service>> + Send;

    fn toggle_featured(&self, id: &str) -> impl Future<Output = DbResult<Service>> + Send;
}

/// Repository for testimonials.
pub trait TestimonialRepository: Send + Sync {
    fn create(
        &self,
        testimonial: &Testimonial,
    ) -> impl Future<Output = DbResult<Testimonial>> + Send;

    fn get(&self, id: &str) -> impl Future<Output = DbResult<Testimonial>> + Send;

    /// Ordered by `order`, then newest first.
    fn list(
        &self,
        query: &CatalogQuery,
    ) -> impl Future<Output = DbResult<Vec<Testimonial>>> + Send;

    fn update(
        &self,
        testimonial: &Testimonial,
    ) -> impl Future<Output = DbResult<Testimonial>> + Send;

    fn delete(&self, id: &str) -> impl Future<Output = DbResult<()>> + Send;

    fn toggle_active(&self, id: &str) -> impl Future<Output = DbResult<Testimonial>> + Send;

    fn toggle_featured(&self, id: &str) -> impl Future<Output = DbResult<Testimonial>> + Send;
}

/// Repository for site settings.
pub trait SettingRepository: Send + Sync {
    /// Sorted by key.
    fn list(&self) -> impl Future<Output = DbResult<Vec<Setting>>> + Send;

    fn get(&self, key: &str) -> impl Future<Output = DbResult<Setting>> + Send;

    /// Insert or overwrite every pair in one transaction. Returns the stored rows.
    fn upsert_many(
        &self,
        values: &[(String, String)],
    ) -> impl Future<Output = DbResult<Vec<Setting>>> + Send;

    fn delete(&self, key: &str) -> impl Future<Output = DbResult<()>> + Send;
}

/// Combined database interface.
///
/// Provides access to repositories via associated types, avoiding dynamic dispatch.
pub trait Database: Send + Sync {
    type Users<'a>: UserRepository
    where
        Self: 'a;
    type Sessions<'a>: SessionRepository
    where
        Self: 'a;
    type Contacts<'a>: ContactRepository
    where
        Self: 'a;
    type Events<'a>: EventRepository
    where
        Self: 'a;
    type Fabrics<'a>: FabricRepository
    where
        Self: 'a;
    type Faqs<'a>: FaqRepository
    where
        Self: 'a;
    type Gallery<'a>: GalleryRepository
    where
        Self: 'a;
    type Services<'a>: ServiceRepository
    where
        Self: 'a;
    type Testimonials<'a>: TestimonialRepository
    where
        Self: 'a;
    type Settings<'a>: SettingRepository
    where
        Self: 'a;

    /// Run pending migrations.
    fn migrate(&self) -> impl Future<Output = DbResult<()>> + Send;

    fn users(&self) -> Self::Users<'_>;
    fn sessions(&self) -> Self::Sessions<'_>;
    fn contacts(&self) -> Self::Contacts<'_>;
    fn events(&self) -> Self::Events<'_>;
    fn fabrics(&self) -> Self::Fabrics<'_>;
    fn faqs(&self) -> Self::Faqs<'_>;
    fn gallery(&self) -> Self::Gallery<'_>;
    fn services(&self) -> Self::Services<'_>;
    fn testimonials(&self) -> Self::Testimonials<'_>;
    fn settings(&self) -> Self::Settings<'_>;
}
