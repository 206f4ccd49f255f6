use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::db::Event;

pub const CELL_COUNT: usize = 42;

pub const WEEKDAY_NAMES: [&str; 7] = ["Пн", "Вт", "Ср", "Чт", "Пт", "Сб", "Вс"];

pub const MONTH_NAMES: [&str; 12] = [
    "Январь",
    "Февраль",
    "Март",
    "Апрель",
    "Май",
    "Июнь",
    "Июль",
    "Август",
    "Сентябрь",
    "Октябрь",
    "Ноябрь",
    "Декабрь",
];

/// Anything that can be placed on the calendar.
pub trait Scheduled {
    fn starts_at(&self) -> NaiveDateTime;
}

impl Scheduled for Event {
    fn starts_at(&self) -> NaiveDateTime {
        self.start_at
    }
}

/// One day of the grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCell<T> {
    pub date: NaiveDate,
    /// False for the padding days of the previous/next month.
    pub in_month: bool,
    pub is_today: bool,
    /// Entries starting on this day, by start time.
    pub entries: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthGrid<T> {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<DayCell<T>>,
}

impl<T> MonthGrid<T> {
    /// Russian month name, e.g. "Март".
    pub fn title(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }

    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell<T>]> {
        self.cells.chunks(7)
    }
}

/// First and last date shown for a month, inclusive.
///
/// `None` for an invalid month.
pub fn grid_range(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first_of_month = NaiveDate::from_ymd_opt(year, month, 1)?;
    let lead = first_of_month.weekday().num_days_from_monday() as u64;
    let start = first_of_month.checked_sub_days(Days::new(lead))?;
    let end = start.checked_add_days(Days::new(CELL_COUNT as u64 - 1))?;
    Some((start, end))
}

/// The grid range as instants: midnight of the first cell through the last
/// second of the last one.
pub fn grid_bounds(year: i32, month: u32) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let (first, last) = grid_range(year, month)?;
    Some((
        first.and_time(NaiveTime::MIN),
        last.and_hms_opt(23, 59, 59)?,
    ))
}

/// Build the 42-cell grid for `year`/`month`, bucketing `entries` by the
/// day they start on. Entries outside the grid are dropped.
pub fn month_grid<T: Scheduled>(
    year: i32,
    month: u32,
    today: NaiveDate,
    entries: impl IntoIterator<Item = T>,
) -> Option<MonthGrid<T>> {
    let (start, end) = grid_range(year, month)?;

    let mut cells: Vec<DayCell<T>> = start
        .iter_days()
        .take(CELL_COUNT)
        .map(|date| DayCell {
            date,
            in_month: date.month() == month && date.year() == year,
            is_today: date == today,
            entries: Vec::new(),
        })
        .collect();

    for entry in entries {
        let day = entry.starts_at().date();
        if day < start || day > end {
            continue;
        }
        let index = (day - start).num_days() as usize;
        cells[index].entries.push(entry);
    }

    for cell in &mut cells {
        cell.entries.sort_by_key(|e| e.starts_at());
    }

    Some(MonthGrid { year, month, cells })
}

pub fn prev_month(year: i32, month: u32) -> (i32, u32) {
    if month <= 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month >= 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}
