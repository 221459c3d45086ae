//! Top bar with the sidebar toggle, the caller's roles, and logout.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::auth::use_session;
use crate::state::ui::UiState;
use crate::util::auth::login_redirect_options;

#[component]
pub fn Header() -> impl IntoView {
    let session = use_session();
    let ui = expect_context::<RwSignal<UiState>>();
    let navigate = use_navigate();

    let role_label = move || {
        let roles = session.roles();
        if roles.is_empty() { "Sin rol".to_owned() } else { roles.iter().collect::<Vec<_>>().join(", ") }
    };

    let on_logout = move |_| {
        session.logout();
        navigate("/login", login_redirect_options());
    };

    view! {
        <header class="header">
            <button class="btn header__menu" title="Menú" on:click=move |_| ui.update(UiState::toggle_sidebar)>
                "☰"
            </button>
            <span class="header__title">"Granja Avícola"</span>
            <span class="header__spacer"></span>
            <span class="header__roles">{role_label}</span>
            <button class="btn header__logout" on:click=on_logout>
                "Cerrar sesión"
            </button>
        </header>
    }
}
