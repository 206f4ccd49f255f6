//! Generic data table: search, sort and paginate in memory.
//!
//! Every admin listing goes through [`apply`]. Rows describe themselves via
//! [`TableRow`]; the query comes straight from the request string.

mod data_table;
mod rows;

#[cfg(test)]
mod data_table_test;

pub use data_table::{
    DEFAULT_PER_PAGE, MAX_PER_PAGE, SortOrder, SortValue, TablePage, TableQuery, TableRow, apply,
};
