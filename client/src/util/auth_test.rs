use super::*;
use crate::auth::roles::RoleSet;
use crate::state::auth::SessionPhase;

fn resolved(is_authenticated: bool) -> AuthState {
    AuthState { is_authenticated, roles: RoleSet::default(), loading: false, phase: SessionPhase::Resolved }
}

#[test]
fn gate_is_pending_while_loading() {
    assert_eq!(gate_decision(&AuthState::default()), GateDecision::Pending);
}

#[test]
fn gate_is_pending_while_loading_even_if_authenticated() {
    let state = AuthState { is_authenticated: true, ..AuthState::default() };
    assert_eq!(gate_decision(&state), GateDecision::Pending);
}

#[test]
fn gate_redirects_when_resolved_without_session() {
    assert_eq!(gate_decision(&resolved(false)), GateDecision::Redirect);
}

#[test]
fn gate_renders_for_authenticated_session() {
    assert_eq!(gate_decision(&resolved(true)), GateDecision::Render);
}

#[test]
fn gate_renders_for_authenticated_session_without_roles() {
    let state = resolved(true);
    assert!(state.roles.is_empty());
    assert_eq!(gate_decision(&state), GateDecision::Render);
}

#[test]
fn login_redirect_replaces_history() {
    let options = login_redirect_options();
    assert!(options.replace);
    assert!(options.scroll);
}
