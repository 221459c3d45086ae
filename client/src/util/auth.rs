//! Shared access-gate helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every protected route applies identical unauthenticated redirect
//! behavior. The decision is a pure function of `AuthState`; the effect and
//! the `RequireAuth` component only act on it.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::auth::AuthState;

/// What a protected route should do for the current session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateDecision {
    /// First resolution has not finished; show a neutral placeholder.
    Pending,
    /// Resolved and unauthenticated; render nothing and go to `/login`.
    Redirect,
    Render,
}

pub fn gate_decision(state: &AuthState) -> GateDecision {
    if state.loading {
        GateDecision::Pending
    } else if state.is_authenticated {
        GateDecision::Render
    } else {
        GateDecision::Redirect
    }
}

/// Navigation options for auth redirects: replace the current history entry
/// so Back does not return to a protected route.
pub fn login_redirect_options() -> NavigateOptions {
    NavigateOptions { replace: true, ..NavigateOptions::default() }
}

/// Redirect to `/login` whenever auth has resolved and no session is present.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + 'static,
{
    Effect::new(move || {
        if auth.with(gate_decision) == GateDecision::Redirect {
            navigate("/login", login_redirect_options());
        }
    });
}
