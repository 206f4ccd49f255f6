use chrono::{Datelike, NaiveDate};
use tabled::builder::Builder;

use crate::calendar::{self, DayCell, WEEKDAY_NAMES};
use crate::cli::error::{CliError, CliResult};
use crate::cli::utils::apply_table_style;
use crate::db::{Database, Event, EventQuery, EventRepository};

/// Label of one grid cell: padding days in parentheses, today in
/// brackets, followed by the number of events.
pub(crate) fn cell_label(cell: &DayCell<Event>) -> String {
    let day = cell.date.day();
    let mut label = if cell.is_today {
        format!("[{}]", day)
    } else if cell.in_month {
        day.to_string()
    } else {
        format!("({})", day)
    };
    if !cell.entries.is_empty() {
        label.push_str(&format!(" •{}", cell.entries.len()));
    }
    label
}

fn event_line(event: &Event) -> String {
    let when = if event.all_day {
        format!("{} all day", event.start_at.format("%d.%m"))
    } else {
        event.start_at.format("%d.%m %H:%M").to_string()
    };
    format!(
        "{}  {} ({}, {}) [{}]",
        when, event.title, event.event_type, event.status, event.id
    )
}

/// Print the six-week grid of a month followed by its events
pub async fn show_calendar<D: Database>(
    db: &D,
    year: i32,
    month: u32,
    today: NaiveDate,
) -> CliResult<String> {
    let (from, to) = calendar::grid_bounds(year, month)
        .ok_or_else(|| CliError::invalid_argument(format!("invalid month: {}", month)))?;

    let events = db
        .events()
        .list(&EventQuery {
            from: Some(from),
            to: Some(to),
            status: None,
        })
        .await?;

    let grid = calendar::month_grid(year, month, today, events)
        .ok_or_else(|| CliError::invalid_argument(format!("invalid month: {}", month)))?;

    let mut builder = Builder::default();
    builder.push_record(WEEKDAY_NAMES);
    for week in grid.weeks() {
        builder.push_record(week.iter().map(cell_label));
    }
    let mut table = builder.build();
    apply_table_style(&mut table);

    let lines: Vec<String> = grid
        .cells
        .iter()
        .flat_map(|cell| cell.entries.iter().map(event_line))
        .collect();

    let events = if lines.is_empty() {
        "No events.".to_string()
    } else {
        lines.join("\n")
    };

    Ok(format!("{} {}\n{}\n{}", grid.title(), year, table, events))
}
