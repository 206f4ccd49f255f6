//! Atelier: public site and admin back-office for a tailoring studio.
//!
//! - `db`: storage traits and the SQLite implementation
//! - `auth`: password hashing and admin sessions
//! - `table`: search, sort and pagination for admin listings
//! - `calendar`: the month grid for events
//! - `site`: server-rendered public pages
//! - `api`: the axum server, admin JSON API and change feed
//! - `cli`: the `atelier` administration tool

pub mod api;
pub mod auth;
pub mod calendar;
pub mod cli;
pub mod db;
pub mod site;
pub mod table;
