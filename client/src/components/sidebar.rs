//! Navigation sidebar filtered by the caller's roles.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::auth::policy::nav_entries;
use crate::state::auth::use_session;
use crate::state::ui::UiState;

#[component]
pub fn Sidebar() -> impl IntoView {
    let session = use_session();
    let ui = expect_context::<RwSignal<UiState>>();

    view! {
        <nav class="sidebar" class:sidebar--open=move || ui.get().sidebar_open>
            <ul class="sidebar__list">
                {move || {
                    nav_entries(&session.roles())
                        .into_iter()
                        .map(|entry| {
                            view! {
                                <li class="sidebar__item">
                                    <A href=entry.href>{entry.label}</A>
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
        </nav>
    }
}
