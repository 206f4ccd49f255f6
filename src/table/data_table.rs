use std::cmp::Ordering;

use serde::Deserialize;
use utoipa::IntoParams;

pub const DEFAULT_PER_PAGE: usize = 10;
pub const MAX_PER_PAGE: usize = 100;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// `desc` (any case) sorts descending, anything else ascending.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }
}

/// A comparable cell value.
///
/// `Empty` (a missing optional field) sorts before any value. Text compares
/// case-insensitively.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Empty,
    Bool(bool),
    Int(i64),
    Text(String),
}

impl SortValue {
    pub fn text(value: &str) -> Self {
        SortValue::Text(value.to_lowercase())
    }

    pub fn optional_text(value: Option<&str>) -> Self {
        value.map_or(SortValue::Empty, SortValue::text)
    }

    pub fn optional_int(value: Option<i64>) -> Self {
        value.map_or(SortValue::Empty, SortValue::Int)
    }

    fn compare(&self, other: &SortValue) -> Ordering {
        use SortValue::*;
        match (self, other) {
            (Empty, Empty) => Ordering::Equal,
            (Empty, _) => Ordering::Less,
            (_, Empty) => Ordering::Greater,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Int(a), Int(b)) => a.cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            // Mixed kinds only happen with a buggy TableRow impl.
            _ => Ordering::Equal,
        }
    }
}

/// A row the data table can search and sort.
pub trait TableRow {
    /// Text the search box matches against.
    fn search_fields(&self) -> Vec<&str>;

    /// Value of a sortable column, `None` if the column is unknown.
    fn sort_value(&self, field: &str) -> Option<SortValue>;
}

/// Table state as it arrives in the query string.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct TableQuery {
    /// Case-insensitive substring search
    #[param(example = "пальто")]
    pub q: Option<String>,
    /// Column to sort by
    #[param(example = "created_at")]
    pub sort: Option<String>,
    /// Sort order (asc, desc)
    #[param(example = "desc")]
    pub order: Option<String>,
    /// 1-based page number
    #[param(example = 1)]
    pub page: Option<usize>,
    /// Rows per page (1-100, default 10)
    #[param(example = 10)]
    pub per_page: Option<usize>,
}

/// One page of filtered and sorted rows.
#[derive(Debug, Clone, PartialEq)]
pub struct TablePage<T> {
    pub items: Vec<T>,
    /// Rows matching the search, across all pages.
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
}

impl<T> TablePage<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> TablePage<U> {
        TablePage {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

fn matches<T: TableRow>(row: &T, needle: &str) -> bool {
    row.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Search, sort and paginate `rows`.
pub fn apply<T: TableRow>(rows: Vec<T>, query: &TableQuery) -> TablePage<T> {
    let needle = query
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase);

    let mut rows: Vec<T> = match needle {
        Some(needle) => rows.into_iter().filter(|r| matches(r, &needle)).collect(),
        None => rows,
    };

    if let Some(field) = query.sort.as_deref().filter(|s| !s.is_empty()) {
        let order = SortOrder::parse(query.order.as_deref());
        // sort_by is stable: ties and unknown columns keep their input order
        rows.sort_by(|a, b| {
            let ordering = match (a.sort_value(field), b.sort_value(field)) {
                (Some(x), Some(y)) => x.compare(&y),
                _ => Ordering::Equal,
            };
            match order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
    }

    let per_page = query
        .per_page
        .unwrap_or(DEFAULT_PER_PAGE)
        .clamp(1, MAX_PER_PAGE);
    let total = rows.len();
    let total_pages = total.div_ceil(per_page).max(1);
    let page = query.page.unwrap_or(1).clamp(1, total_pages);

    let items = rows
        .into_iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .collect();

    TablePage {
        items,
        total,
        page,
        per_page,
        total_pages,
    }
}
