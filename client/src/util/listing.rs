//! Date handling, filtering, grouping, and pagination for list screens.
//!
//! DESIGN
//! ======
//! The API sends ISO timestamps (`2024-05-01T00:00:00`). Only the calendar
//! date matters to the screens, so every comparison works on the leading
//! `YYYY-MM-DD` and ignores time and zone. Unparsable dates never match a
//! bounded range and sort last in either order.

#[cfg(test)]
#[path = "listing_test.rs"]
mod listing_test;

use std::cmp::Ordering;

use time::Date;
use time::macros::format_description;

/// Shown where a record carries no usable date.
pub const NO_DATE: &str = "Sin fecha";

pub fn parse_api_date(raw: &str) -> Option<Date> {
    let head = raw.trim().get(..10)?;
    Date::parse(head, format_description!("[year]-[month]-[day]")).ok()
}

/// `dd/mm/yyyy`, or `"Sin fecha"`.
pub fn format_date(raw: &str) -> String {
    parse_api_date(raw)
        .and_then(|date| date.format(format_description!("[day]/[month]/[year]")).ok())
        .unwrap_or_else(|| NO_DATE.to_owned())
}

/// `YYYY-MM-DD` for `<input type="date">` values.
pub fn input_date(raw: &str) -> String {
    parse_api_date(raw)
        .and_then(|date| date.format(format_description!("[year]-[month]-[day]")).ok())
        .unwrap_or_default()
}

/// Inclusive calendar range; either bound may be open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<Date>,
    pub end: Option<Date>,
}

impl DateRange {
    /// Build from two `<input type="date">` values; blanks are open bounds.
    pub fn from_inputs(start: &str, end: &str) -> Self {
        Self { start: parse_api_date(start), end: parse_api_date(end) }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, date: Date) -> bool {
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }

    /// Whether a raw API date falls in range.
    pub fn contains_raw(&self, raw: &str) -> bool {
        if self.is_unbounded() {
            return true;
        }
        parse_api_date(raw).is_some_and(|date| self.contains(date))
    }
}

pub fn filter_by_date<T, F>(items: &[T], range: DateRange, key: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> &str,
{
    items.iter().filter(|item| range.contains_raw(key(item))).cloned().collect()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// Stable sort by date; records without a date go last.
pub fn sort_by_date<T, F>(items: &mut [T], order: SortOrder, key: F)
where
    F: Fn(&T) -> &str,
{
    items.sort_by(|a, b| match (parse_api_date(key(a)), parse_api_date(key(b))) {
        (Some(a), Some(b)) => match order {
            SortOrder::Asc => a.cmp(&b),
            SortOrder::Desc => b.cmp(&a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Group by displayed date, keeping first-seen group order.
pub fn group_by_date<T, F>(items: Vec<T>, key: F) -> Vec<(String, Vec<T>)>
where
    F: Fn(&T) -> &str,
{
    let mut groups: Vec<(String, Vec<T>)> = Vec::new();
    for item in items {
        let label = format_date(key(&item));
        match groups.iter_mut().find(|(existing, _)| *existing == label) {
            Some((_, members)) => members.push(item),
            None => groups.push((label, vec![item])),
        }
    }
    groups
}

/// One-based page selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    pub number: usize,
    pub size: usize,
}

impl Page {
    /// Page `number` of a `len`-item list, pulled back onto the last page
    /// when a filter has shrunk the list below it.
    pub fn clamped(number: usize, size: usize, len: usize) -> Self {
        Self { number: clamp_page(number, total_pages(len, size)), size }
    }
}

pub fn total_pages(len: usize, size: usize) -> usize {
    if size == 0 { 0 } else { len.div_ceil(size) }
}

/// `current` limited to `1..=total`; page 1 when there are no pages.
pub fn clamp_page(current: usize, total: usize) -> usize {
    current.clamp(1, total.max(1))
}

/// The items on `page`; empty past the end.
pub fn paginate<T>(items: &[T], page: Page) -> &[T] {
    if page.size == 0 || page.number == 0 {
        return &[];
    }
    let start = (page.number - 1).saturating_mul(page.size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page.size).min(items.len());
    &items[start..end]
}

/// Page numbers for the pagination buttons: a window of `visible` pages
/// starting half a window before `current`, clipped to `total`.
pub fn page_window(current: usize, total: usize, visible: usize) -> Vec<usize> {
    if total == 0 || visible == 0 {
        return Vec::new();
    }
    let first = current.saturating_sub(visible / 2).max(1);
    let last = (first + visible - 1).min(total);
    (first..=last).collect()
}

/// Case-insensitive substring match; an empty needle matches everything.
pub fn matches_search(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}
