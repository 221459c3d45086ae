//! Dismissible banner for the most recent request failure.

use leptos::prelude::*;

use crate::state::ui::UiState;

#[component]
pub fn ErrorBanner() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();

    view! {
        <Show when=move || ui.get().error.is_some()>
            <div class="error-banner" role="alert">
                <span class="error-banner__text">{move || ui.get().error.unwrap_or_default()}</span>
                <button class="btn error-banner__close" title="Cerrar" on:click=move |_| ui.update(UiState::clear_error)>
                    "×"
                </button>
            </div>
        </Show>
    }
}
