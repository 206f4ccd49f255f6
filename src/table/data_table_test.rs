use super::*;

#[derive(Debug, Clone, PartialEq)]
struct Row {
    name: &'static str,
    city: Option<&'static str>,
    age: i64,
}

impl TableRow for Row {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name];
        fields.extend(self.city);
        fields
    }

    fn sort_value(&self, field: &str) -> Option<SortValue> {
        Some(match field {
            "name" => SortValue::text(self.name),
            "city" => SortValue::optional_text(self.city),
            "age" => SortValue::Int(self.age),
            _ => return None,
        })
    }
}

fn rows() -> Vec<Row> {
    vec![
        Row { name: "Мария", city: Some("Москва"), age: 31 },
        Row { name: "анна", city: None, age: 25 },
        Row { name: "Борис", city: Some("Казань"), age: 25 },
        Row { name: "Вера", city: Some("москва"), age: 40 },
    ]
}

fn names(page: &TablePage<Row>) -> Vec<&str> {
    page.items.iter().map(|r| r.name).collect()
}

fn query() -> TableQuery {
    TableQuery::default()
}

#[test]
fn default_query_returns_first_page_unchanged() {
    let page = apply(rows(), &query());
    assert_eq!(names(&page), vec!["Мария", "анна", "Борис", "Вера"]);
    assert_eq!(page.total, 4);
    assert_eq!(page.page, 1);
    assert_eq!(page.per_page, DEFAULT_PER_PAGE);
    assert_eq!(page.total_pages, 1);
}

#[test]
fn search_is_case_insensitive_over_all_fields() {
    let page = apply(
        rows(),
        &TableQuery {
            q: Some("МОСКВА".to_string()),
            ..query()
        },
    );
    assert_eq!(names(&page), vec!["Мария", "Вера"]);
    assert_eq!(page.total, 2);
}

#[test]
fn blank_search_matches_everything() {
    let page = apply(
        rows(),
        &TableQuery {
            q: Some("   ".to_string()),
            ..query()
        },
    );
    assert_eq!(page.total, 4);
}

#[test]
fn sort_text_ignores_case() {
    let page = apply(
        rows(),
        &TableQuery {
            sort: Some("name".to_string()),
            ..query()
        },
    );
    assert_eq!(names(&page), vec!["анна", "Борис", "Вера", "Мария"]);
}

#[test]
fn sort_descending_is_stable_for_ties() {
    let page = apply(
        rows(),
        &TableQuery {
            sort: Some("age".to_string()),
            order: Some("desc".to_string()),
            ..query()
        },
    );
    assert_eq!(names(&page), vec!["Вера", "Мария", "анна", "Борис"]);
}

#[test]
fn empty_values_sort_first() {
    let page = apply(
        rows(),
        &TableQuery {
            sort: Some("city".to_string()),
            ..query()
        },
    );
    assert_eq!(page.items[0].name, "анна");
}

#[test]
fn unknown_sort_field_keeps_input_order() {
    let page = apply(
        rows(),
        &TableQuery {
            sort: Some("salary".to_string()),
            order: Some("desc".to_string()),
            ..query()
        },
    );
    assert_eq!(names(&page), vec!["Мария", "анна", "Борис", "Вера"]);
}

#[test]
fn pagination_slices_and_counts_pages() {
    let q = TableQuery {
        page: Some(2),
        per_page: Some(3),
        ..query()
    };
    let page = apply(rows(), &q);
    assert_eq!(names(&page), vec!["Вера"]);
    assert_eq!(page.total, 4);
    assert_eq!(page.total_pages, 2);
}

#[test]
fn page_is_clamped_into_range() {
    let too_far = apply(
        rows(),
        &TableQuery {
            page: Some(99),
            per_page: Some(3),
            ..query()
        },
    );
    assert_eq!(too_far.page, 2);

    let zero = apply(
        rows(),
        &TableQuery {
            page: Some(0),
            ..query()
        },
    );
    assert_eq!(zero.page, 1);
}

#[test]
fn per_page_is_clamped() {
    let zero = apply(
        rows(),
        &TableQuery {
            per_page: Some(0),
            ..query()
        },
    );
    assert_eq!(zero.per_page, 1);
    assert_eq!(zero.total_pages, 4);

    let huge = apply(
        rows(),
        &TableQuery {
            per_page: Some(10_000),
            ..query()
        },
    );
    assert_eq!(huge.per_page, MAX_PER_PAGE);
}

#[test]
fn empty_input_still_has_one_page() {
    let page = apply(Vec::<Row>::new(), &query());
    assert!(page.items.is_empty());
    assert_eq!(page.total, 0);
    assert_eq!(page.page, 1);
    assert_eq!(page.total_pages, 1);
}

#[test]
fn map_keeps_pagination() {
    let page = apply(
        rows(),
        &TableQuery {
            per_page: Some(2),
            ..query()
        },
    )
    .map(|r| r.age);
    assert_eq!(page.items, vec![31, 25]);
    assert_eq!(page.total_pages, 2);
}

#[test]
fn sort_order_parsing() {
    assert_eq!(SortOrder::parse(Some("DESC")), SortOrder::Desc);
    assert_eq!(SortOrder::parse(Some("asc")), SortOrder::Asc);
    assert_eq!(SortOrder::parse(Some("sideways")), SortOrder::Asc);
    assert_eq!(SortOrder::parse(None), SortOrder::Asc);
}
