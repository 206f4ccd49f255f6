//! V1 API handlers.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::error::ApiError;
use crate::db::CatalogQuery;

mod auth;
mod contacts;
mod events;
mod fabrics;
mod faqs;
mod gallery;
mod public;
mod services;
mod settings;
mod stats;
mod system;
mod testimonials;

#[cfg(test)]
pub(crate) mod test_helpers;

#[cfg(test)]
mod events_test;
#[cfg(test)]
mod gallery_test;

pub use auth::*;
pub use contacts::*;
pub use events::*;
pub use fabrics::*;
pub use faqs::*;
pub use gallery::*;
pub use public::*;
pub use services::*;
pub use settings::*;
pub use stats::*;
pub use system::*;
pub use testimonials::*;

/// Body of deletes and logout.
#[derive(Debug, Serialize, ToSchema)]
pub struct SuccessResponse {
    #[schema(example = true)]
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

pub(crate) fn default_true() -> bool {
    true
}

/// Parse an enum field from its wire name, failing with a 400 and `message`.
pub(crate) fn parse_field<T: FromStr>(value: &str, message: &'static str) -> Result<T, ApiError> {
    value.parse().map_err(|_| ApiError::validation(message))
}

/// Filters shared by the catalog listings.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct CatalogParams {
    /// Only this category
    pub category: Option<String>,
    /// `true` for active rows only
    pub active: Option<bool>,
    /// `true` for featured rows only
    pub featured: Option<bool>,
}

impl CatalogParams {
    pub fn to_query(&self) -> CatalogQuery {
        CatalogQuery {
            category: self.category.clone().filter(|c| !c.is_empty()),
            active_only: self.active == Some(true),
            featured_only: self.featured == Some(true),
            limit: None,
        }
    }
}
