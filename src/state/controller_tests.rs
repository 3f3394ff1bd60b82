//! Tests for ListController.

use super::*;
use serde_json::{json, Value};

fn people() -> Vec<Value> {
    vec![
        json!({"id": "p1", "name": "Ana", "status": "paid"}),
        json!({"id": "p2", "name": "Ben", "status": "pending"}),
        json!({"id": "p3", "name": "Cleo", "status": "paid"}),
        json!({"id": "p4", "name": "Dan", "status": "rejected"}),
    ]
}

fn names(rows: &[&Value]) -> Vec<String> {
    rows.iter()
        .map(|r| r["name"].as_str().unwrap_or_default().to_string())
        .collect()
}

fn keyed(rows_per_page: usize) -> ListController<Value> {
    ListController::builder(people())
        .search_fields(["name", "status"])
        .rows_per_page(rows_per_page)
        .key_fn(|row: &Value| RowKey::id(row["id"].as_str().unwrap_or_default()))
        .build()
        .expect("valid controller")
}

fn page(n: usize) -> PageNumber {
    PageNumber::new(n).expect("valid page")
}

fn rpp(n: usize) -> RowsPerPage {
    RowsPerPage::new(n).expect("valid rows per page")
}

// ===== Construction =====

mod construction {
    use super::*;

    #[test]
    fn default_rows_per_page_is_twenty() {
        let controller = ListController::builder(people()).build().expect("valid");
        assert_eq!(controller.rows_per_page().get(), 20);
        assert_eq!(controller.page(), PageNumber::FIRST);
    }

    #[test]
    fn zero_rows_per_page_is_rejected() {
        let result = ListController::builder(people()).rows_per_page(0).build();
        assert!(matches!(
            result,
            Err(ControllerError::InvalidRowsPerPage(_))
        ));
    }

    #[test]
    fn blank_search_field_is_rejected() {
        let result = ListController::builder(people())
            .search_fields(["name", " "])
            .build();
        assert!(matches!(result, Err(ControllerError::InvalidField(_))));
    }

    #[test]
    fn every_search_field_starts_blank() {
        let controller = keyed(2);
        assert_eq!(controller.search().query("name"), Some(""));
        assert_eq!(controller.search().query("status"), Some(""));
        assert!(!controller.has_active_search());
    }
}

// ===== Derive =====

mod derive {
    use super::*;

    #[test]
    fn blank_search_returns_data_unchanged() {
        let controller = keyed(20);
        let view = controller.derive();
        assert_eq!(names(&view.filtered), ["Ana", "Ben", "Cleo", "Dan"]);
        assert_eq!(view.total_rows(), 4);
    }

    #[test]
    fn search_filters_case_insensitively() {
        let mut controller = keyed(2);
        controller.set_search("name", "AN").expect("known field");

        let view = controller.derive();
        assert_eq!(names(&view.filtered), ["Ana", "Dan"]);
        assert_eq!(view.total_rows(), 2);
        assert_eq!(view.total_pages(), 1);
        assert_eq!(view.page(), PageNumber::FIRST);
        assert_eq!(names(&view.paginated), ["Ana", "Dan"]);
        assert_eq!((view.start_item(), view.end_item()), (1, 2));
    }

    #[test]
    fn second_page_of_three() {
        let mut controller = keyed(3);
        controller.set_page(page(2));

        let view = controller.derive();
        assert_eq!(names(&view.paginated), ["Dan"]);
        assert_eq!((view.start_item(), view.end_item()), (4, 4));
        assert_eq!(view.total_pages(), 2);
    }

    #[test]
    fn multi_field_search_is_and() {
        let mut controller = keyed(20);
        controller.set_search("status", "paid").expect("known field");
        controller.set_search("name", "c").expect("known field");

        let view = controller.derive();
        assert_eq!(names(&view.filtered), ["Cleo"]);
    }

    #[test]
    fn no_match_reports_zero_counts() {
        let mut controller = keyed(2);
        controller.set_search("name", "zzz").expect("known field");

        let view = controller.derive();
        assert!(view.paginated.is_empty());
        assert_eq!(view.total_rows(), 0);
        assert_eq!(view.total_pages(), 0);
        assert_eq!((view.start_item(), view.end_item()), (0, 0));
    }

    #[test]
    fn derive_is_idempotent() {
        let mut controller = keyed(2);
        controller.set_search("status", "p").expect("known field");

        assert_eq!(controller.derive(), controller.derive());
    }

    #[test]
    fn paginated_keys_align_with_rows() {
        let mut controller = keyed(2);
        controller.set_page(page(2));

        let view = controller.derive();
        assert_eq!(view.paginated_keys, vec![RowKey::id("p3"), RowKey::id("p4")]);
    }

    #[test]
    fn positional_keys_index_into_data() {
        let mut controller = ListController::builder(people())
            .search_fields(["name"])
            .build()
            .expect("valid");
        controller.set_search("name", "an").expect("known field");

        let view = controller.derive();
        assert_eq!(view.paginated_keys, vec![RowKey::Position(0), RowKey::Position(3)]);
    }
}

// ===== Page transitions =====

mod paging {
    use super::*;

    #[test]
    fn search_resets_page() {
        let mut controller = keyed(1);
        controller.set_page(page(3));
        assert_eq!(controller.page(), page(3));

        controller.set_search("status", "p").expect("known field");
        assert_eq!(controller.page(), PageNumber::FIRST);
    }

    #[test]
    fn rows_per_page_resets_page() {
        let mut controller = keyed(1);
        controller.set_page(page(4));

        controller.set_rows_per_page(rpp(2));
        assert_eq!(controller.page(), PageNumber::FIRST);
        assert_eq!(controller.rows_per_page(), rpp(2));
    }

    #[test]
    fn out_of_range_page_settles_to_first() {
        let mut controller = keyed(2);
        controller.set_page(page(2 + 5));

        assert_eq!(controller.page(), PageNumber::FIRST);
    }

    #[test]
    fn clamp_policy_settles_to_last_page() {
        let mut controller = ListController::builder(people())
            .rows_per_page(3)
            .out_of_range(OutOfRangePolicy::ClampToLast)
            .build()
            .expect("valid");
        controller.set_page(page(9));

        assert_eq!(controller.page(), page(2));
    }

    #[test]
    fn clear_search_resets_page_and_queries() {
        let mut controller = keyed(1);
        controller.set_search("name", "a").expect("known field");
        controller.set_page(page(2));

        controller.clear_search();
        assert_eq!(controller.page(), PageNumber::FIRST);
        assert!(!controller.has_active_search());
    }

    #[test]
    fn shrinking_data_settles_page() {
        let mut controller = keyed(1);
        controller.set_page(page(4));

        controller.replace_data(people().into_iter().take(2).collect());
        assert_eq!(controller.page(), PageNumber::FIRST);
    }

    #[test]
    fn in_range_refresh_keeps_page() {
        let mut controller = keyed(1);
        controller.set_page(page(2));

        controller.replace_data(people());
        assert_eq!(controller.page(), page(2));
    }

    #[test]
    fn settled_state_is_idle() {
        let mut controller = keyed(1);
        controller.set_page(page(2));
        assert_eq!(controller.state().phase, crate::state::reducer::Phase::Idle);
    }
}

// ===== Search field policy =====

mod fields {
    use super::*;

    #[test]
    fn unknown_field_is_inert_by_default() {
        let mut controller = keyed(1);
        controller.set_page(page(2));

        assert_eq!(controller.set_search("email", "x"), Ok(()));
        assert_eq!(controller.page(), page(2));
        assert!(!controller.has_active_search());
    }

    #[test]
    fn unknown_field_is_rejected_in_strict_mode() {
        let mut controller = ListController::builder(people())
            .search_fields(["name"])
            .strict_fields(true)
            .build()
            .expect("valid");

        let err = controller.set_search("email", "x");
        assert_eq!(
            err,
            Err(ControllerError::UnknownSearchField {
                field: "email".to_string()
            })
        );
    }
}

// ===== Selection and expansion =====

mod marks {
    use super::*;

    #[test]
    fn selection_survives_filtering() {
        let mut controller = keyed(20);
        controller.toggle_selected(RowKey::id("p4"));

        controller.set_search("name", "an").expect("known field");
        let view = controller.derive();
        assert_eq!(view.selected_positions(), vec![1]);

        controller.clear_search();
        let view = controller.derive();
        assert_eq!(view.selected_positions(), vec![3]);
    }

    #[test]
    fn selection_survives_page_change() {
        let mut controller = keyed(2);
        controller.toggle_selected(RowKey::id("p1"));
        controller.set_page(page(2));

        assert!(controller.derive().selected_positions().is_empty());
        assert!(controller.selected().contains(&RowKey::id("p1")));
    }

    #[test]
    fn selection_survives_refetch_reordering() {
        let mut controller = keyed(20);
        controller.toggle_selected(RowKey::id("p2"));

        let mut reordered = people();
        reordered.reverse();
        controller.replace_data(reordered);

        let view = controller.derive();
        assert_eq!(view.selected_positions(), vec![2]);
        assert!(view.is_selected(2));
    }

    #[test]
    fn positional_keys_are_absolute_across_pages() {
        let mut controller = ListController::builder(people()[..2].to_vec())
            .build()
            .expect("valid controller");
        controller.toggle_selected(RowKey::Position(0));
        assert_eq!(controller.derive().selected_positions(), vec![0]);

        controller.replace_page(people()[2..].to_vec(), 2);

        let view = controller.derive();
        assert_eq!(controller.offset(), 2);
        assert_eq!(view.paginated_keys, vec![RowKey::Position(2), RowKey::Position(3)]);
        assert!(view.selected_positions().is_empty());
    }

    #[test]
    fn replace_data_resets_offset() {
        let mut controller = ListController::builder(people())
            .build()
            .expect("valid controller");
        controller.replace_page(people(), 10);
        controller.replace_data(people());

        assert_eq!(controller.offset(), 0);
        assert_eq!(controller.key_at(1, &people()[1]), RowKey::Position(1));
    }

    #[test]
    fn toggle_returns_new_membership() {
        let mut controller = keyed(20);
        assert!(controller.toggle_expanded(RowKey::id("p3")));
        assert!(controller.derive().is_expanded(2));
        assert!(!controller.toggle_expanded(RowKey::id("p3")));
        assert!(controller.expanded().is_empty());
    }

    #[test]
    fn set_selection_replaces_wholesale() {
        let mut controller = keyed(20);
        controller.toggle_selected(RowKey::id("p1"));

        controller.set_selection([RowKey::id("p3")].into_iter().collect());
        assert_eq!(controller.selected().sorted(), vec![RowKey::id("p3")]);
    }

    #[test]
    fn select_all_visible_adds_current_page() {
        let mut controller = keyed(2);
        controller.toggle_selected(RowKey::id("p4"));

        controller.select_all_visible();
        assert_eq!(
            controller.selected().sorted(),
            vec![RowKey::id("p1"), RowKey::id("p2"), RowKey::id("p4")]
        );
    }

    #[test]
    fn prune_drops_keys_of_vanished_rows() {
        let mut controller = keyed(20);
        controller.toggle_selected(RowKey::id("p1"));
        controller.toggle_expanded(RowKey::id("p4"));

        controller.replace_data(people().into_iter().take(2).collect());
        assert_eq!(controller.selected().len(), 1);
        assert_eq!(controller.expanded().len(), 1);

        controller.prune_missing_keys();
        assert_eq!(controller.selected().len(), 1);
        assert!(controller.expanded().is_empty());
    }

    #[test]
    fn clear_selection_empties_set() {
        let mut controller = keyed(20);
        controller.select_all_visible();
        controller.clear_selection();
        assert!(controller.selected().is_empty());
    }
}
