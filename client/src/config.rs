//! API configuration baked in at build time.
//!
//! The browser bundle has no process environment, so values are read with
//! `option_env!` when the WASM crate is compiled.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE_URL: &str = "https://pruebabackend-production-e215.up.railway.app";
pub const DEFAULT_TOKEN_TTL_DAYS: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Farm API origin without a trailing slash.
    pub base_url: String,
    /// Lifetime of the token cookie written at login.
    pub token_ttl_days: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_API_BASE_URL.to_owned(), token_ttl_days: DEFAULT_TOKEN_TTL_DAYS }
    }
}

impl ApiConfig {
    /// Build config from compile-time environment.
    ///
    /// Optional:
    /// - `GRANJA_API_BASE_URL`: farm API origin
    /// - `GRANJA_TOKEN_TTL_DAYS`: cookie lifetime in days, default 1
    pub fn from_build_env() -> Self {
        Self::from_values(option_env!("GRANJA_API_BASE_URL"), option_env!("GRANJA_TOKEN_TTL_DAYS"))
    }

    pub(crate) fn from_values(base_url: Option<&str>, ttl_days: Option<&str>) -> Self {
        let base_url = base_url
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_owned();
        let token_ttl_days = ttl_days
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|days| *days > 0)
            .unwrap_or(DEFAULT_TOKEN_TTL_DAYS);
        Self { base_url, token_ttl_days }
    }

    /// Absolute URL for an API path such as `/api/lotes`.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}
