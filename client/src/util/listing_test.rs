use super::*;
use time::macros::date;

// =============================================================
// Dates
// =============================================================

#[test]
fn parse_api_date_reads_leading_calendar_date() {
    assert_eq!(parse_api_date("2024-05-01T13:45:00"), Some(date!(2024 - 05 - 01)));
    assert_eq!(parse_api_date("2024-05-01"), Some(date!(2024 - 05 - 01)));
    assert_eq!(parse_api_date(""), None);
    assert_eq!(parse_api_date("01/05/2024"), None);
    assert_eq!(parse_api_date("2024-13-01"), None);
}

#[test]
fn format_date_is_day_month_year() {
    assert_eq!(format_date("2024-05-01T00:00:00"), "01/05/2024");
    assert_eq!(format_date("garbage"), NO_DATE);
    assert_eq!(input_date("2024-05-01T00:00:00"), "2024-05-01");
    assert_eq!(input_date(""), "");
}

#[test]
fn range_bounds_are_inclusive_and_optional() {
    let range = DateRange::from_inputs("2024-05-01", "2024-05-31");
    assert!(range.contains(date!(2024 - 05 - 01)));
    assert!(range.contains(date!(2024 - 05 - 31)));
    assert!(!range.contains(date!(2024 - 06 - 01)));

    let open_end = DateRange::from_inputs("2024-05-01", "");
    assert!(open_end.contains(date!(2030 - 01 - 01)));
    assert!(!open_end.contains(date!(2024 - 04 - 30)));
}

#[test]
fn unbounded_range_accepts_undated_records() {
    let range = DateRange::default();
    assert!(range.contains_raw(""));
    let bounded = DateRange::from_inputs("2024-01-01", "");
    assert!(!bounded.contains_raw(""));
}

#[test]
fn filter_by_date_keeps_matching_items() {
    let items = vec!["2024-05-01T00:00:00", "2024-06-15T00:00:00", ""];
    let range = DateRange::from_inputs("2024-06-01", "2024-06-30");
    assert_eq!(filter_by_date(&items, range, |s| *s), vec!["2024-06-15T00:00:00"]);
}

// =============================================================
// Sorting and grouping
// =============================================================

#[test]
fn sort_by_date_orders_and_puts_undated_last() {
    let mut items = vec!["2024-05-02", "", "2024-05-01", "2024-05-03"];
    sort_by_date(&mut items, SortOrder::Desc, |s| *s);
    assert_eq!(items, vec!["2024-05-03", "2024-05-02", "2024-05-01", ""]);
    sort_by_date(&mut items, SortOrder::Asc, |s| *s);
    assert_eq!(items, vec!["2024-05-01", "2024-05-02", "2024-05-03", ""]);
}

#[test]
fn sort_is_stable_for_equal_dates() {
    let mut items = vec![("2024-05-01", 'a'), ("2024-05-01", 'b'), ("2024-04-01", 'c')];
    sort_by_date(&mut items, SortOrder::Desc, |(d, _)| *d);
    assert_eq!(items.iter().map(|(_, c)| *c).collect::<String>(), "abc");
}

#[test]
fn sort_order_toggles() {
    assert_eq!(SortOrder::default(), SortOrder::Desc);
    assert_eq!(SortOrder::Desc.toggled(), SortOrder::Asc);
}

#[test]
fn group_by_date_preserves_first_seen_order() {
    let items = vec![
        ("2024-05-02T08:00:00", 1),
        ("2024-05-01T08:00:00", 2),
        ("2024-05-02T18:00:00", 3),
    ];
    let groups = group_by_date(items, |(d, _)| *d);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].0, "02/05/2024");
    assert_eq!(groups[0].1.iter().map(|(_, n)| *n).collect::<Vec<_>>(), vec![1, 3]);
    assert_eq!(groups[1].0, "01/05/2024");
}

// =============================================================
// Pagination
// =============================================================

#[test]
fn total_pages_rounds_up() {
    assert_eq!(total_pages(0, 10), 0);
    assert_eq!(total_pages(10, 10), 1);
    assert_eq!(total_pages(11, 10), 2);
    assert_eq!(total_pages(5, 0), 0);
}

#[test]
fn paginate_slices_one_based_pages() {
    let items: Vec<u32> = (1..=12).collect();
    assert_eq!(paginate(&items, Page { number: 1, size: 5 }), &[1, 2, 3, 4, 5]);
    assert_eq!(paginate(&items, Page { number: 3, size: 5 }), &[11, 12]);
    assert!(paginate(&items, Page { number: 4, size: 5 }).is_empty());
    assert!(paginate(&items, Page { number: 0, size: 5 }).is_empty());
}

#[test]
fn clamp_page_stays_within_existing_pages() {
    assert_eq!(clamp_page(3, 1), 1);
    assert_eq!(clamp_page(3, 5), 3);
    assert_eq!(clamp_page(0, 5), 1);
    assert_eq!(clamp_page(4, 0), 1);
}

#[test]
fn clamped_page_survives_a_shrinking_filter() {
    // 25 rows viewed on page 3, then a date range leaves 8.
    let all: Vec<u32> = (1..=25).collect();
    assert_eq!(paginate(&all, Page::clamped(3, 10, all.len())), &[21, 22, 23, 24, 25]);

    let narrowed: Vec<u32> = (1..=8).collect();
    let page = Page::clamped(3, 10, narrowed.len());
    assert_eq!(page, Page { number: 1, size: 10 });
    assert_eq!(paginate(&narrowed, page), narrowed.as_slice());
}

#[test]
fn clamped_page_of_empty_list_is_first() {
    let empty: Vec<u32> = Vec::new();
    let page = Page::clamped(2, 10, 0);
    assert_eq!(page.number, 1);
    assert!(paginate(&empty, page).is_empty());
}

#[test]
fn page_window_slides_around_current() {
    assert_eq!(page_window(1, 10, 3), vec![1, 2, 3]);
    assert_eq!(page_window(5, 10, 3), vec![4, 5, 6]);
    assert_eq!(page_window(10, 10, 3), vec![9, 10]);
    assert_eq!(page_window(1, 2, 3), vec![1, 2]);
    assert!(page_window(1, 0, 3).is_empty());
}

#[test]
fn matches_search_is_case_insensitive() {
    assert!(matches_search("Extra Grande", "grande"));
    assert!(matches_search("Pigui", ""));
    assert!(!matches_search("Mediano", "pequeño"));
    assert!(matches_search("PEQUEÑO", "pequeño"));
}
