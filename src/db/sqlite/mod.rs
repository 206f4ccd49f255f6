//! SQLite implementation of the database traits.
//!
//! This module provides a SQLite-backed implementation of the repository
//! traits defined in the parent module.

mod connection;
mod contact;
mod event;
mod fabric;
mod faq;
mod gallery;
mod helpers;
mod service;
mod session;
mod setting;
mod testimonial;
mod user;

#[cfg(test)]
mod fabric_test;
#[cfg(test)]
mod faq_test;
#[cfg(test)]
mod service_test;
#[cfg(test)]
mod session_test;
#[cfg(test)]
mod setting_test;

pub use connection::SqliteDatabase;
pub use contact::SqliteContactRepository;
pub use event::SqliteEventRepository;
pub use fabric::SqliteFabricRepository;
pub use faq::SqliteFaqRepository;
pub use gallery::SqliteGalleryRepository;
pub use service::SqliteServiceRepository;
pub use session::SqliteSessionRepository;
pub use setting::SqliteSettingRepository;
pub use testimonial::SqliteTestimonialRepository;
pub use user::SqliteUserRepository;
