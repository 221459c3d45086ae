//! Session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route guards, navigation, and every role-gated control read this state.
//! It is derived entirely from the token held in the `TokenStore`; nothing
//! else about the user is kept client-side.
//!
//! DESIGN
//! ======
//! `AuthState` holds the plain transitions so they can be tested without a
//! reactive runtime. `Session` wraps one `RwSignal<AuthState>` together with
//! the store it reads from, and performs each transition inside a single
//! `update` so subscribers never observe a half-applied change.
//!
//! `loading` starts true and is cleared by the first `resolve`; no later
//! transition sets it again, so a logout never flashes the loading view.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;

use crate::auth::policy::Capability;
use crate::auth::roles::{RoleSet, extract_roles};
use crate::auth::token_store::TokenStore;

/// Lifecycle of the first resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionPhase {
    #[default]
    Uninitialized,
    Resolving,
    Resolved,
}

/// Snapshot of the caller's authentication status.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthState {
    pub is_authenticated: bool,
    pub roles: RoleSet,
    pub loading: bool,
    pub phase: SessionPhase,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            is_authenticated: false,
            roles: RoleSet::default(),
            loading: true,
            phase: SessionPhase::Uninitialized,
        }
    }
}

impl AuthState {
    /// Recompute authentication and roles from the store.
    pub fn resolve(&mut self, store: &TokenStore) {
        self.phase = SessionPhase::Resolving;
        match store.read() {
            Some(token) => {
                self.roles = extract_roles(Some(&token));
                self.is_authenticated = true;
            }
            None => {
                self.roles = RoleSet::default();
                self.is_authenticated = false;
            }
        }
        self.loading = false;
        self.phase = SessionPhase::Resolved;
    }

    /// Persist `token` and resolve from it.
    pub fn login(&mut self, store: &TokenStore, token: &str, ttl_days: u32) {
        store.write(token, ttl_days);
        self.resolve(store);
    }

    pub fn logout(&mut self, store: &TokenStore) {
        store.clear();
        self.is_authenticated = false;
        self.roles = RoleSet::default();
        self.loading = false;
        self.phase = SessionPhase::Resolved;
    }

    pub fn allows(&self, capability: Capability) -> bool {
        self.is_authenticated && capability.allowed(&self.roles)
    }
}

/// Reactive handle to the one session of this page.
#[derive(Clone, Copy)]
pub struct Session {
    state: RwSignal<AuthState>,
    store: StoredValue<TokenStore>,
}

impl Session {
    pub fn new(store: TokenStore) -> Self {
        Self { state: RwSignal::new(AuthState::default()), store: StoredValue::new(store) }
    }

    /// The underlying signal, for effects and guards.
    pub fn state(&self) -> RwSignal<AuthState> {
        self.state
    }

    pub fn store(&self) -> TokenStore {
        self.store.get_value()
    }

    pub fn snapshot(&self) -> AuthState {
        self.state.get_untracked()
    }

    pub fn resolve(&self) {
        self.store.with_value(|store| self.state.update(|s| s.resolve(store)));
    }

    pub fn login(&self, token: &str, ttl_days: u32) {
        self.store.with_value(|store| self.state.update(|s| s.login(store, token, ttl_days)));
    }

    pub fn logout(&self) {
        self.store.with_value(|store| self.state.update(|s| s.logout(store)));
    }

    /// Reactive capability check; tracks the session signal.
    pub fn allows(&self, capability: Capability) -> bool {
        self.state.with(|s| s.allows(capability))
    }

    /// Reactive copy of the current roles.
    pub fn roles(&self) -> RoleSet {
        self.state.with(|s| s.roles.clone())
    }
}

/// Create the page's session and install it as context.
pub fn provide_session(store: TokenStore) -> Session {
    let session = Session::new(store);
    provide_context(session);
    session
}

/// The session installed by `provide_session`.
pub fn use_session() -> Session {
    expect_context::<Session>()
}
