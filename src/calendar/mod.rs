//! Month view for the events calendar.
//!
//! A month is always shown as six Monday-first weeks (42 cells), padded with
//! days from the neighbouring months.

mod grid;


pub use grid::{
    CELL_COUNT, DayCell, MONTH_NAMES, MonthGrid, Scheduled, WEEKDAY_NAMES, grid_bounds, grid_range, month_grid,
    next_month, prev_month,
};
