//! CLI subcommands.
//!
//! Every command works directly on a [`Database`](crate::db::Database) and
//! returns the text to print, so the commands are exercised in tests
//! against an in-memory database.

pub mod calendar;
pub mod contact;
pub mod setting;
pub mod user;

#[cfg(test)]
#[path = "calendar_test.rs"]
mod calendar_test;
