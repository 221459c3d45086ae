//! Bearer-token persistence across a short-lived cookie and durable storage.
//!
//! SYSTEM CONTEXT
//! ==============
//! The login flow writes the token here, the session resolver and the API
//! pipeline read it, and logout / 401 handling clear it. Both locations use
//! the key `token`.
//!
//! DESIGN
//! ======
//! Each location is a `TokenSlot`. Browser slots compile only with the
//! `hydrate` feature; `MemorySlot` stands in everywhere else so native tests
//! exercise the same read/write/clear rules. Slot failures never surface to
//! callers: a storage error reads as absence and a failed write is logged.

#[cfg(test)]
#[path = "token_store_test.rs"]
mod token_store_test;

use std::sync::{Arc, RwLock};

/// Cookie and localStorage key for the bearer token.
pub const TOKEN_KEY: &str = "token";

#[cfg(any(test, feature = "hydrate"))]
const SECONDS_PER_DAY: i64 = 86_400;

/// One persistence location for the token string.
pub trait TokenSlot: Send + Sync {
    /// Current value, or `None` when nothing is stored.
    fn get(&self) -> Option<String>;
    /// Store `value`. `ttl_days` is honoured by expiring locations only.
    fn set(&self, value: &str, ttl_days: Option<u32>);
    /// Remove the stored value. Removing an absent value is a no-op.
    fn remove(&self);
}

/// In-process slot used outside the browser.
#[derive(Debug, Default)]
pub struct MemorySlot {
    value: RwLock<Option<String>>,
}

impl TokenSlot for MemorySlot {
    fn get(&self) -> Option<String> {
        match self.value.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn set(&self, value: &str, _ttl_days: Option<u32>) {
        match self.value.write() {
            Ok(mut guard) => *guard = Some(value.to_owned()),
            Err(poisoned) => *poisoned.into_inner() = Some(value.to_owned()),
        }
    }

    fn remove(&self) {
        match self.value.write() {
            Ok(mut guard) => *guard = None,
            Err(poisoned) => *poisoned.into_inner() = None,
        }
    }
}

/// `document.cookie` slot. Writes carry `Max-Age` so the browser expires the
/// token after the requested number of days.
#[derive(Clone, Copy, Debug, Default)]
pub struct CookieSlot;

/// `window.localStorage` slot. Values never expire.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageSlot;

#[cfg(feature = "hydrate")]
fn html_document() -> Option<web_sys::HtmlDocument> {
    use wasm_bindgen::JsCast as _;
    web_sys::window()?
        .document()?
        .dyn_into::<web_sys::HtmlDocument>()
        .ok()
}

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

impl TokenSlot for CookieSlot {
    fn get(&self) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            let raw = html_document()?.cookie().ok()?;
            cookie_value(&raw, TOKEN_KEY)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }

    fn set(&self, value: &str, ttl_days: Option<u32>) {
        #[cfg(feature = "hydrate")]
        {
            let Some(doc) = html_document() else {
                log::warn!("token cookie write skipped: no document");
                return;
            };
            if doc.set_cookie(&set_cookie_header(TOKEN_KEY, value, ttl_days)).is_err() {
                log::warn!("token cookie write rejected by browser");
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (value, ttl_days);
        }
    }

    fn remove(&self) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(doc) = html_document() {
                if doc.set_cookie(&removal_cookie_header(TOKEN_KEY)).is_err() {
                    log::warn!("token cookie removal rejected by browser");
                }
            }
        }
    }
}

impl TokenSlot for LocalStorageSlot {
    fn get(&self) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.get_item(TOKEN_KEY).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }

    fn set(&self, value: &str, _ttl_days: Option<u32>) {
        #[cfg(feature = "hydrate")]
        {
            let Some(storage) = local_storage() else {
                log::warn!("token localStorage write skipped: storage unavailable");
                return;
            };
            if storage.set_item(TOKEN_KEY, value).is_err() {
                log::warn!("token localStorage write failed");
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = value;
        }
    }

    fn remove(&self) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                if storage.remove_item(TOKEN_KEY).is_err() {
                    log::warn!("token localStorage removal failed");
                }
            }
        }
    }
}

/// Find cookie `name` in a `document.cookie` string.
#[cfg(any(test, feature = "hydrate"))]
pub(crate) fn cookie_value(raw: &str, name: &str) -> Option<String> {
    cookie::Cookie::split_parse(raw)
        .filter_map(Result::ok)
        .find(|c| c.name() == name)
        .map(|c| c.value().to_owned())
        .filter(|v| !v.is_empty())
}

/// `Set-Cookie`-style assignment for `document.cookie`.
#[cfg(any(test, feature = "hydrate"))]
pub(crate) fn set_cookie_header(name: &str, value: &str, ttl_days: Option<u32>) -> String {
    let mut builder = cookie::Cookie::build((name.to_owned(), value.to_owned()))
        .path("/")
        .same_site(cookie::SameSite::Lax);
    if let Some(days) = ttl_days {
        builder = builder.max_age(time::Duration::seconds(i64::from(days) * SECONDS_PER_DAY));
    }
    builder.build().to_string()
}

/// Assignment that makes the browser drop cookie `name` immediately.
#[cfg(any(test, feature = "hydrate"))]
pub(crate) fn removal_cookie_header(name: &str) -> String {
    cookie::Cookie::build((name.to_owned(), String::new()))
        .path("/")
        .same_site(cookie::SameSite::Lax)
        .max_age(time::Duration::ZERO)
        .build()
        .to_string()
}

/// Redundant token storage: a short-lived cookie plus a durable store.
///
/// Cloning is cheap and every clone addresses the same slots.
#[derive(Clone)]
pub struct TokenStore {
    cookie: Arc<dyn TokenSlot>,
    durable: Arc<dyn TokenSlot>,
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("has_token", &self.read().is_some())
            .finish()
    }
}

impl TokenStore {
    pub fn new(cookie: Arc<dyn TokenSlot>, durable: Arc<dyn TokenSlot>) -> Self {
        Self { cookie, durable }
    }

    /// Cookie + `localStorage`. Outside the browser both slots read as empty.
    pub fn browser() -> Self {
        Self::new(Arc::new(CookieSlot), Arc::new(LocalStorageSlot))
    }

    /// Two independent in-memory slots.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySlot::default()), Arc::new(MemorySlot::default()))
    }

    /// Store `token` in both locations; the cookie expires after `ttl_days`.
    pub fn write(&self, token: &str, ttl_days: u32) {
        self.cookie.set(token, Some(ttl_days));
        self.durable.set(token, None);
    }

    /// The cookie value when present, else the durable value, else `None`.
    pub fn read(&self) -> Option<String> {
        self.cookie
            .get()
            .filter(|t| !t.is_empty())
            .or_else(|| self.durable.get().filter(|t| !t.is_empty()))
    }

    /// Remove the token from both locations.
    pub fn clear(&self) {
        self.cookie.remove();
        self.durable.remove();
    }

    #[cfg(test)]
    pub(crate) fn cookie_slot(&self) -> &dyn TokenSlot {
        self.cookie.as_ref()
    }

    #[cfg(test)]
    pub(crate) fn durable_slot(&self) -> &dyn TokenSlot {
        self.durable.as_ref()
    }
}

impl Default for TokenStore {
    fn default() -> Self {
        if cfg!(feature = "hydrate") { Self::browser() } else { Self::in_memory() }
    }
}
