//! Acceptance tests for the list-state controller.
//!
//! Each test drives the public API the way a list view would and checks
//! the derived output the view renders.

use serde_json::{json, Value};
use tabstate::{
    ControllerError, KeySet, ListAction, ListController, OutOfRangePolicy, PageNumber, RowKey,
    RowsPerPage,
};

// ===== Test Fixtures =====

fn people() -> Vec<Value> {
    vec![
        json!({"id": "u1", "name": "Ana", "city": "Lisbon"}),
        json!({"id": "u2", "name": "Ben", "city": "Porto"}),
        json!({"id": "u3", "name": "Cleo", "city": "Lisbon"}),
        json!({"id": "u4", "name": "Dan", "city": null}),
    ]
}

fn names(rows: &[&Value]) -> Vec<String> {
    rows.iter()
        .map(|r| r["name"].as_str().unwrap_or_default().to_string())
        .collect()
}

fn keyed(rows_per_page: usize) -> ListController<Value> {
    ListController::builder(people())
        .search_fields(["name", "city"])
        .rows_per_page(rows_per_page)
        .key_fn(|row: &Value| RowKey::id(row["id"].as_str().unwrap_or_default()))
        .build()
        .expect("valid controller")
}

// ===== Scenario 1: Case-Insensitive Search =====

#[test]
fn search_filters_case_insensitively_and_resets_page() {
    // GIVEN: four people, two per page, viewing page 2
    let mut c = keyed(2);
    c.set_page(PageNumber::new(2).expect("non-zero"));
    assert_eq!(c.page().get(), 2);

    // WHEN: searching names for "an"
    c.set_search("name", "an").expect("known field");

    // THEN: Ana and Dan remain on a single page, back at page 1
    let view = c.derive();
    assert_eq!(names(&view.filtered), vec!["Ana", "Dan"]);
    assert_eq!(names(&view.paginated), vec!["Ana", "Dan"]);
    assert_eq!(view.total_rows(), 2);
    assert_eq!(view.total_pages(), 1);
    assert_eq!(view.page(), PageNumber::FIRST);
    assert_eq!((view.start_item(), view.end_item()), (1, 2));
}

// ===== Scenario 2: Partial Last Page =====

#[test]
fn last_page_holds_the_remainder() {
    // GIVEN: no search, three per page
    let mut c = keyed(3);

    // WHEN: moving to page 2
    c.set_page(PageNumber::new(2).expect("non-zero"));

    // THEN: only Dan is visible
    let view = c.derive();
    assert_eq!(names(&view.paginated), vec!["Dan"]);
    assert_eq!((view.start_item(), view.end_item()), (4, 4));
    assert_eq!(view.total_pages(), 2);
}

// ===== Scenario 3: AND Across Fields =====

#[test]
fn every_active_field_must_match() {
    let mut c = keyed(10);
    c.set_search("city", "lisbon").expect("known field");
    assert_eq!(names(&c.derive().filtered), vec!["Ana", "Cleo"]);

    c.set_search("name", "CLE").expect("known field");
    assert_eq!(names(&c.derive().filtered), vec!["Cleo"]);

    // Null cells compare as empty.
    c.clear_search();
    c.set_search("city", "o").expect("known field");
    assert!(!names(&c.derive().filtered).contains(&"Dan".to_string()));
}

// ===== Scenario 4: Out-Of-Range Self-Correction =====

#[test]
fn page_beyond_last_settles_to_first_once() {
    let mut c = keyed(2);
    let total = c.total_pages();

    c.set_page(PageNumber::new(total + 5).expect("non-zero"));
    assert_eq!(c.page(), PageNumber::FIRST);

    let view = c.derive();
    assert_eq!(names(&view.paginated), vec!["Ana", "Ben"]);
    assert_eq!(c.derive(), view);
}

#[test]
fn shrinking_data_settles_page() {
    let mut c = keyed(1);
    c.set_page(PageNumber::new(4).expect("non-zero"));

    c.replace_data(people().into_iter().take(2).collect());

    assert_eq!(c.page(), PageNumber::FIRST);
}

#[test]
fn clamp_policy_moves_to_last_page() {
    let mut c = ListController::builder(people())
        .search_fields(["name"])
        .rows_per_page(1)
        .out_of_range(OutOfRangePolicy::ClampToLast)
        .build()
        .expect("valid controller");

    c.set_page(PageNumber::new(9).expect("non-zero"));

    assert_eq!(c.page().get(), 4);
}

// ===== Scenario 5: Page Size Change =====

#[test]
fn page_size_change_returns_to_first_page() {
    let mut c = keyed(1);
    c.set_page(PageNumber::new(3).expect("non-zero"));

    c.set_rows_per_page(RowsPerPage::new(2).expect("non-zero"));

    let view = c.derive();
    assert_eq!(view.page(), PageNumber::FIRST);
    assert_eq!(view.rows_per_page().get(), 2);
    assert_eq!(view.total_pages(), 2);
}

#[test]
fn zero_page_size_is_rejected_at_construction() {
    let err = ListController::builder(people())
        .rows_per_page(0)
        .build()
        .expect_err("zero page size");

    assert!(matches!(err, ControllerError::InvalidRowsPerPage(_)));
}

// ===== Scenario 6: Stable Selection =====

#[test]
fn selection_follows_rows_through_filtering() {
    // GIVEN: Cleo is selected and expanded on the unfiltered list
    let mut c = keyed(10);
    c.set_selection(KeySet::from_iter([RowKey::id("u3")]));
    c.set_expansion(KeySet::from_iter([RowKey::id("u3")]));
    assert_eq!(c.derive().selected_positions(), vec![2]);

    // WHEN: a search moves Cleo to the top of the page
    c.set_search("city", "lisbon").expect("known field");

    // THEN: the marks follow Cleo, not the old position
    let view = c.derive();
    assert_eq!(view.selected_positions(), vec![1]);
    assert_eq!(view.expanded_positions(), vec![1]);
}

#[test]
fn selection_survives_reordered_refetch() {
    let mut c = keyed(10);
    c.toggle_selected(RowKey::id("u1"));

    let mut reordered = people();
    reordered.reverse();
    c.replace_data(reordered);

    assert_eq!(c.derive().selected_positions(), vec![3]);
}

#[test]
fn selection_is_replaced_wholesale() {
    let mut c = keyed(10);
    c.set_selection(KeySet::from_iter([RowKey::id("u1"), RowKey::id("u2")]));
    c.set_selection(KeySet::from_iter([RowKey::id("u4")]));

    assert_eq!(c.selected().sorted(), vec![RowKey::id("u4")]);
}

// ===== Scenario 7: Unknown Search Field =====

#[test]
fn unknown_field_is_inert_by_default() {
    let mut c = keyed(2);
    c.set_page(PageNumber::new(2).expect("non-zero"));

    c.set_search("email", "ana").expect("lenient mode accepts");

    assert_eq!(c.page().get(), 2);
    assert!(!c.has_active_search());
}

#[test]
fn unknown_field_is_rejected_in_strict_mode() {
    let mut c = ListController::builder(people())
        .search_fields(["name"])
        .strict_fields(true)
        .build()
        .expect("valid controller");

    let err = c
        .apply(ListAction::SetSearch {
            field: "email".to_string(),
            value: "ana".to_string(),
        })
        .expect_err("strict mode");

    assert_eq!(err.to_string(), "Unknown search field 'email'");
}
