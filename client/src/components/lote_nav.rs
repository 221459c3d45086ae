//! Title strip for the per-lote screens with links to the sibling screens.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::auth::policy::lote_destinations;
use crate::net::types::Lote;
use crate::state::auth::use_session;

#[component]
pub fn LoteNav(title: &'static str, id_lote: i64, #[prop(into)] lote: Signal<Option<Lote>>) -> impl IntoView {
    let session = use_session();

    view! {
        <header class="lote-nav">
            <h2 class="lote-nav__title">
                {title}
                " - Lote "
                {move || lote.get().map_or_else(|| id_lote.to_string(), |l| l.num_lote)}
            </h2>
            <Show when=move || lote.get().is_some_and(|l| l.estado_baja)>
                <span class="lote-nav__badge">"Dado de baja"</span>
            </Show>
            <nav class="lote-nav__links">
                {move || {
                    lote_destinations(&session.roles())
                        .into_iter()
                        .map(|(dest, label)| view! { <A href=format!("/{dest}/{id_lote}")>{label}</A> })
                        .collect_view()
                }}
            </nav>
        </header>
    }
}
