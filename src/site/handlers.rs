//! Public page handlers.
//!
//! Pages are served from the page cache when possible. Read failures are
//! logged and render as empty sections rather than error pages.

use axum::{
    Form,
    extract::{Query, State},
    response::{Html, Redirect},
};
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::api::v1::ContactFormRequest;
use crate::api::{AppState, Entity, UpdateMessage, cache_key};
use crate::db::{
    CatalogQuery, ContactRepository, Database, DbResult, FabricRepository, FaqRepository,
    GalleryRepository, ServiceRepository, SettingRepository, TestimonialRepository,
};

use super::html::SiteSettings;
use super::pages::{self, HomeContent, Notice};

/// Featured gallery items on the home page.
pub const HOME_GALLERY_LIMIT: usize = 6;

fn or_empty<T: Default>(result: DbResult<T>, what: &str) -> T {
    result.unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load {} for public page", what);
        T::default()
    })
}

async fn site_settings<D: Database>(state: &AppState<D>) -> SiteSettings {
    SiteSettings::from(or_empty(state.db().settings().list().await, "settings"))
}

/// Serve `key` from the page cache, or return the generation a fresh
/// rendering must be stored against.
fn from_cache<D: Database>(state: &AppState<D>, key: &str) -> Result<Html<String>, u64> {
    let pages = state.pages();
    let generation = pages.generation(key);
    pages.get(key).map(Html).ok_or(generation)
}

fn store<D: Database>(
    state: &AppState<D>,
    key: String,
    html: String,
    generation: u64,
) -> Html<String> {
    if !state.pages().insert_if_current(key, html.clone(), generation) {
        debug!("Page revalidated while rendering, not cached");
    }
    Html(html)
}

/// Like [`store`], but unknown categories are rendered without caching so
/// arbitrary query values cannot grow the cache.
fn store_listing<D: Database>(
    state: &AppState<D>,
    key: String,
    html: String,
    generation: u64,
    category: Option<&str>,
    categories: &[String],
) -> Html<String> {
    match category {
        Some(c) if !categories.iter().any(|known| known == c) => Html(html),
        _ => store(state, key, html, generation),
    }
}

fn selected_category(category: &Option<String>) -> Option<String> {
    category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
}

fn category_key(path: &str, category: Option<&str>) -> String {
    let query = category.map(|c| format!("category={}", c));
    cache_key(path, query.as_deref())
}

fn public_in(category: Option<&str>) -> CatalogQuery {
    CatalogQuery {
        category: category.map(str::to_string),
        ..CatalogQuery::public()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct HomeParams {
    pub sent: Option<String>,
    pub error: Option<String>,
}

impl HomeParams {
    fn notice(&self) -> Option<Notice> {
        if self.sent.is_some() {
            Some(Notice::Sent)
        } else if self.error.is_some() {
            Some(Notice::Error)
        } else {
            None
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CategoryParams {
    pub category: Option<String>,
}

async fn render_home<D: Database>(state: &AppState<D>, notice: Option<Notice>) -> String {
    let db = state.db();
    let content = HomeContent {
        services: or_empty(db.services().list(&CatalogQuery::public()).await, "services"),
        gallery: or_empty(
            db.gallery()
                .list(&CatalogQuery::featured(Some(HOME_GALLERY_LIMIT)))
                .await,
            "gallery",
        ),
        testimonials: or_empty(
            db.testimonials().list(&CatalogQuery::featured(None)).await,
            "testimonials",
        ),
        faqs: or_empty(db.faqs().list(&CatalogQuery::public()).await, "faqs"),
    };
    pages::home(&site_settings(state).await, &content, notice)
}

#[instrument(skip(state))]
pub async fn home<D: Database>(
    State(state): State<AppState<D>>,
    Query(params): Query<HomeParams>,
) -> Html<String> {
    let notice = params.notice();
    let key = cache_key("/", notice.map(Notice::query));
    let generation = match from_cache(&state, &key) {
        Ok(page) => return page,
        Err(generation) => generation,
    };
    let html = render_home(&state, notice).await;
    store(&state, key, html, generation)
}

#[instrument(skip(state))]
pub async fn about<D: Database>(State(state): State<AppState<D>>) -> Html<String> {
    let key = cache_key("/about", None);
    let generation = match from_cache(&state, &key) {
        Ok(page) => return page,
        Err(generation) => generation,
    };

    let db = state.db();
    let services = or_empty(db.services().list(&CatalogQuery::public()).await, "services");
    let faqs = or_empty(db.faqs().list(&CatalogQuery::public()).await, "faqs");
    let html = pages::about(&site_settings(&state).await, &services, &faqs);
    store(&state, key, html, generation)
}

#[instrument(skip(state))]
pub async fn gallery<D: Database>(
    State(state): State<AppState<D>>,
    Query(params): Query<CategoryParams>,
) -> Html<String> {
    let category = selected_category(&params.category);
    let key = category_key("/gallery", category.as_deref());
    let generation = match from_cache(&state, &key) {
        Ok(page) => return page,
        Err(generation) => generation,
    };

    let db = state.db();
    let items = or_empty(
        db.gallery().list(&public_in(category.as_deref())).await,
        "gallery",
    );
    let categories = or_empty(db.gallery().categories().await, "gallery categories");
    let html = pages::gallery(
        &site_settings(&state).await,
        &items,
        &categories,
        category.as_deref(),
    );
    store_listing(
        &state,
        key,
        html,
        generation,
        category.as_deref(),
        &categories,
    )
}

#[instrument(skip(state))]
pub async fn fabrics<D: Database>(
    State(state): State<AppState<D>>,
    Query(params): Query<CategoryParams>,
) -> Html<String> {
    let category = selected_category(&params.category);
    let key = category_key("/fabrics", category.as_deref());
    let generation = match from_cache(&state, &key) {
        Ok(page) => return page,
        Err(generation) => generation,
    };

    let db = state.db();
    let fabrics = or_empty(
        db.fabrics().list(&public_in(category.as_deref())).await,
        "fabrics",
    );
    let categories = or_empty(db.fabrics().categories().await, "fabric categories");
    let html = pages::fabrics(
        &site_settings(&state).await,
        &fabrics,
        &categories,
        category.as_deref(),
    );
    store_listing(
        &state,
        key,
        html,
        generation,
        category.as_deref(),
        &categories,
    )
}

/// Contact form as posted by the browser. Missing fields arrive empty so
/// validation, not extraction, rejects them.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
    pub service_id: String,
}

impl From<ContactForm> for ContactFormRequest {
    fn from(form: ContactForm) -> Self {
        ContactFormRequest {
            name: form.name,
            email: form.email,
            phone: Some(form.phone),
            subject: Some(form.subject),
            message: form.message,
            service_id: Some(form.service_id),
        }
    }
}

#[instrument(skip(state))]
pub async fn submit_contact_form<D: Database>(
    State(state): State<AppState<D>>,
    Form(form): Form<ContactForm>,
) -> Redirect {
    let contact = ContactFormRequest::from(form).into_contact();

    match state.db().contacts().create(&contact).await {
        Ok(created) => {
            info!(id = %created.id, "Contact request received via form");
            state.publish(UpdateMessage::created(Entity::Contact, &created.id));
            Redirect::to(&format!("/?{}", Notice::Sent.query()))
        }
        Err(e) => {
            warn!(error = %e, "Contact form rejected");
            Redirect::to(&format!("/?{}", Notice::Error.query()))
        }
    }
}
