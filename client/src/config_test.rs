use super::*;

#[test]
fn defaults_apply_when_unset() {
    let config = ApiConfig::from_values(None, None);
    assert_eq!(config, ApiConfig::default());
    assert_eq!(config.token_ttl_days, 1);
}

#[test]
fn base_url_trailing_slash_is_trimmed() {
    let config = ApiConfig::from_values(Some("https://granja.test/"), None);
    assert_eq!(config.base_url, "https://granja.test");
}

#[test]
fn blank_base_url_falls_back_to_default() {
    let config = ApiConfig::from_values(Some("   "), None);
    assert_eq!(config.base_url, DEFAULT_API_BASE_URL);
}

#[test]
fn ttl_parses_positive_days() {
    assert_eq!(ApiConfig::from_values(None, Some("7")).token_ttl_days, 7);
}

#[test]
fn invalid_or_zero_ttl_falls_back_to_default() {
    assert_eq!(ApiConfig::from_values(None, Some("abc")).token_ttl_days, 1);
    assert_eq!(ApiConfig::from_values(None, Some("0")).token_ttl_days, 1);
}

#[test]
fn url_joins_with_and_without_leading_slash() {
    let config = ApiConfig::from_values(Some("https://granja.test"), None);
    assert_eq!(config.url("/getcorral"), "https://granja.test/getcorral");
    assert_eq!(config.url("api/Ventas/updProducto"), "https://granja.test/api/Ventas/updProducto");
}
