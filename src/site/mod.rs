//! Server-rendered public site.

mod handlers;
pub mod html;
pub mod markdown;
pub mod pages;

#[cfg(test)]
mod pages_test;

use axum::Router;
use axum::routing::{get, post};

use crate::api::AppState;
use crate::db::Database;

pub use handlers::{ContactForm, HOME_GALLERY_LIMIT};

/// Routes for the public pages.
pub fn router<D: Database + 'static>() -> Router<AppState<D>> {
    Router::new()
        .route("/", get(handlers::home::<D>))
        .route("/about", get(handlers::about::<D>))
        .route("/gallery", get(handlers::gallery::<D>))
        .route("/fabrics", get(handlers::fabrics::<D>))
        .route("/contact", post(handlers::submit_contact_form::<D>))
}
