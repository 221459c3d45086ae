use super::*;

const ADMIN_TOKEN: &str = "abc.eyJyb2xlIjoiQWRtaW4ifQ==.sig";

// =============================================================
// AuthState transitions
// =============================================================

#[test]
fn default_is_loading_and_unauthenticated() {
    let state = AuthState::default();
    assert!(state.loading);
    assert!(!state.is_authenticated);
    assert!(state.roles.is_empty());
    assert_eq!(state.phase, SessionPhase::Uninitialized);
}

#[test]
fn resolve_without_token_clears_loading() {
    let store = TokenStore::in_memory();
    let mut state = AuthState::default();
    state.resolve(&store);
    assert!(!state.loading);
    assert!(!state.is_authenticated);
    assert!(state.roles.is_empty());
    assert_eq!(state.phase, SessionPhase::Resolved);
}

#[test]
fn resolve_with_token_reads_roles() {
    let store = TokenStore::in_memory();
    store.write(ADMIN_TOKEN, 1);
    let mut state = AuthState::default();
    state.resolve(&store);
    assert!(state.is_authenticated);
    assert!(state.roles.contains("Admin"));
}

#[test]
fn resolve_with_opaque_token_is_authenticated_without_roles() {
    let store = TokenStore::in_memory();
    store.write("not-a-jwt", 1);
    let mut state = AuthState::default();
    state.resolve(&store);
    assert!(state.is_authenticated);
    assert!(state.roles.is_empty());
    assert!(!state.allows(Capability::ViewProduccion));
}

#[test]
fn resolve_is_idempotent() {
    let store = TokenStore::in_memory();
    store.write(ADMIN_TOKEN, 1);
    let mut state = AuthState::default();
    state.resolve(&store);
    let first = state.clone();
    state.resolve(&store);
    assert_eq!(state, first);
}

#[test]
fn login_writes_store_then_resolves() {
    let store = TokenStore::in_memory();
    let mut state = AuthState::default();
    state.login(&store, ADMIN_TOKEN, 1);
    assert_eq!(store.read().as_deref(), Some(ADMIN_TOKEN));
    assert!(state.is_authenticated);
    assert_eq!(state.roles.as_slice(), ["Admin".to_owned()]);
    assert!(!state.loading);
}

#[test]
fn logout_clears_everything_without_loading() {
    let store = TokenStore::in_memory();
    let mut state = AuthState::default();
    state.login(&store, ADMIN_TOKEN, 1);
    state.logout(&store);
    assert_eq!(store.read(), None);
    assert!(!state.is_authenticated);
    assert!(state.roles.is_empty());
    assert!(!state.loading);
}

#[test]
fn logout_before_resolve_still_ends_loading() {
    let store = TokenStore::in_memory();
    let mut state = AuthState::default();
    state.logout(&store);
    assert!(!state.loading);
    assert_eq!(state.phase, SessionPhase::Resolved);
}

#[test]
fn unauthenticated_state_allows_nothing_even_with_stale_roles() {
    let state = AuthState {
        is_authenticated: false,
        roles: ["Admin"].into_iter().collect(),
        loading: false,
        phase: SessionPhase::Resolved,
    };
    assert!(!state.allows(Capability::ManageLotes));
}

// =============================================================
// Session wrapper
// =============================================================

#[test]
fn session_transitions_update_signal() {
    let session = Session::new(TokenStore::in_memory());
    assert!(session.snapshot().loading);

    session.resolve();
    assert!(!session.snapshot().loading);
    assert!(!session.snapshot().is_authenticated);

    session.login(ADMIN_TOKEN, 1);
    let state = session.snapshot();
    assert!(state.is_authenticated);
    assert!(state.roles.contains("Admin"));

    session.logout();
    let state = session.snapshot();
    assert!(!state.is_authenticated);
    assert!(state.roles.is_empty());
    assert!(!state.loading);
    assert_eq!(session.store().read(), None);
}

#[test]
fn session_copies_share_state() {
    let session = Session::new(TokenStore::in_memory());
    let copy = session;
    copy.login(ADMIN_TOKEN, 1);
    assert!(session.snapshot().is_authenticated);
    assert_eq!(session.store().read().as_deref(), Some(ADMIN_TOKEN));
}
