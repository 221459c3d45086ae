//! Access gate for protected routes.
//!
//! SYSTEM CONTEXT
//! ==============
//! Wraps every route except `/login`. While the first session resolution is
//! in flight it shows a neutral placeholder; once resolved it either renders
//! its children or navigates to `/login`, replacing the history entry.
//! `RequireCapability` applies the same fail-closed rule to one section.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::auth::policy::Capability;
use crate::state::auth::use_session;
use crate::util::auth::{GateDecision, gate_decision, install_unauth_redirect};

#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let state = use_session().state();
    install_unauth_redirect(state, use_navigate());

    // Memo so role or phase changes that keep the decision do not rebuild
    // the protected subtree.
    let decision = Memo::new(move |_| state.with(gate_decision));

    move || match decision.get() {
        GateDecision::Pending => view! { <div class="gate gate--pending">"Cargando..."</div> }.into_any(),
        GateDecision::Redirect => ().into_any(),
        GateDecision::Render => children().into_any(),
    }
}

/// Renders `children` only when the session allows `capability`.
#[component]
pub fn RequireCapability(capability: Capability, children: ChildrenFn) -> impl IntoView {
    let session = use_session();
    let allowed = Memo::new(move |_| session.allows(capability));

    move || {
        if allowed.get() {
            children().into_any()
        } else {
            view! { <p class="gate gate--denied">"No tiene permisos para ver esta sección."</p> }.into_any()
        }
    }
}
