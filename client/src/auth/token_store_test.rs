use super::*;

// =============================================================
// TokenStore read/write/clear
// =============================================================

#[test]
fn read_is_none_when_nothing_stored() {
    let store = TokenStore::in_memory();
    assert_eq!(store.read(), None);
}

#[test]
fn write_then_read_returns_token() {
    let store = TokenStore::in_memory();
    store.write("a.b.c", 1);
    assert_eq!(store.read().as_deref(), Some("a.b.c"));
}

#[test]
fn write_populates_both_locations() {
    let store = TokenStore::in_memory();
    store.write("tok", 3);
    assert_eq!(store.cookie_slot().get().as_deref(), Some("tok"));
    assert_eq!(store.durable_slot().get().as_deref(), Some("tok"));
}

#[test]
fn clear_empties_both_locations() {
    let store = TokenStore::in_memory();
    store.write("tok", 1);
    store.clear();
    assert_eq!(store.read(), None);
    assert_eq!(store.cookie_slot().get(), None);
    assert_eq!(store.durable_slot().get(), None);
}

#[test]
fn clear_on_empty_store_is_noop() {
    let store = TokenStore::in_memory();
    store.clear();
    store.clear();
    assert_eq!(store.read(), None);
}

#[test]
fn read_prefers_cookie_over_durable() {
    let store = TokenStore::in_memory();
    store.durable_slot().set("durable", None);
    store.cookie_slot().set("cookie", Some(1));
    assert_eq!(store.read().as_deref(), Some("cookie"));
}

#[test]
fn read_falls_back_to_durable_when_cookie_expired() {
    let store = TokenStore::in_memory();
    store.write("tok", 1);
    store.cookie_slot().remove();
    assert_eq!(store.read().as_deref(), Some("tok"));
}

#[test]
fn empty_cookie_value_counts_as_absent() {
    let store = TokenStore::in_memory();
    store.cookie_slot().set("", Some(1));
    store.durable_slot().set("durable", None);
    assert_eq!(store.read().as_deref(), Some("durable"));
}

#[test]
fn clones_share_slots() {
    let store = TokenStore::in_memory();
    let other = store.clone();
    store.write("shared", 1);
    assert_eq!(other.read().as_deref(), Some("shared"));
}

#[test]
fn browser_store_reads_empty_outside_browser() {
    let store = TokenStore::browser();
    store.write("tok", 1);
    assert_eq!(store.read(), None);
}

// =============================================================
// Cookie string helpers
// =============================================================

#[test]
fn cookie_value_finds_named_cookie() {
    let raw = "theme=dark; token=abc.def.ghi; other=1";
    assert_eq!(cookie_value(raw, "token").as_deref(), Some("abc.def.ghi"));
}

#[test]
fn cookie_value_missing_or_empty_is_none() {
    assert_eq!(cookie_value("theme=dark", "token"), None);
    assert_eq!(cookie_value("token=", "token"), None);
    assert_eq!(cookie_value("", "token"), None);
}

#[test]
fn set_cookie_header_carries_max_age_in_seconds() {
    let header = set_cookie_header("token", "abc", Some(2));
    assert!(header.starts_with("token=abc"));
    assert!(header.contains("Max-Age=172800"));
    assert!(header.contains("Path=/"));
}

#[test]
fn set_cookie_header_without_ttl_is_session_cookie() {
    let header = set_cookie_header("token", "abc", None);
    assert!(!header.contains("Max-Age"));
}

#[test]
fn removal_cookie_header_expires_immediately() {
    let header = removal_cookie_header("token");
    assert!(header.starts_with("token="));
    assert!(header.contains("Max-Age=0"));
}
