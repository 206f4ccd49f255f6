use chrono::{NaiveDate, NaiveDateTime};

use crate::cli::commands::calendar::*;
use crate::cli::error::CliError;
use crate::db::{Database, Event, EventRepository, EventStatus, EventType, SqliteDatabase};

async fn setup_db() -> SqliteDatabase {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create test database");
    db.migrate().await.expect("Failed to run migrations");
    db
}

fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
}

fn make_event(title: &str, start: &str, all_day: bool) -> Event {
    Event {
        id: String::new(),
        title: title.to_string(),
        description: None,
        event_type: EventType::Fitting,
        status: EventStatus::Scheduled,
        start_at: at(start),
        end_at: None,
        all_day,
        location: None,
        contact_id: None,
        created_at: String::new(),
        updated_at: String::new(),
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 16).unwrap()
}

#[tokio::test]
async fn test_calendar_grid_layout() {
    let db = setup_db().await;

    let output = show_calendar(&db, 2025, 3, today()).await.unwrap();
    assert!(output.starts_with("Март 2025\n"));
    assert!(output.contains("Пн"));
    assert!(output.contains("Вс"));
    // leading padding from February, trailing from April
    assert!(output.contains("(24)"));
    assert!(output.contains("(6)"));
    assert!(!output.contains("(7)"));
    assert!(output.contains("[16]"));
    assert!(output.ends_with("No events."));
}

#[tokio::test]
async fn test_calendar_lists_events_in_grid() {
    let db = setup_db().await;
    for event in [
        make_event("Примерка пальто", "2025-03-10 14:30", false),
        make_event("Консультация", "2025-03-10 09:00", false),
        make_event("Выдача заказа", "2025-02-25 00:00", true),
        make_event("Вне сетки", "2025-04-20 12:00", false),
    ] {
        db.events().create(&event).await.unwrap();
    }

    let output = show_calendar(&db, 2025, 3, today()).await.unwrap();
    assert!(output.contains("10 •2"));
    assert!(output.contains("(25) •1"));
    assert!(output.contains("25.02 all day  Выдача заказа (fitting, scheduled)"));
    assert!(!output.contains("Вне сетки"));

    let morning = output.find("10.03 09:00  Консультация").unwrap();
    let afternoon = output.find("10.03 14:30  Примерка пальто").unwrap();
    assert!(morning < afternoon);
}

#[tokio::test]
async fn test_calendar_rejects_invalid_month() {
    let db = setup_db().await;
    let result = show_calendar(&db, 2025, 13, today()).await;
    assert!(matches!(result, Err(CliError::InvalidArgument { .. })));
}
