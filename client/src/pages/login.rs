//! Login page: exchanges username and password for a bearer token.
//!
//! SYSTEM CONTEXT
//! ==============
//! The only route outside the access gate. The login request is sent
//! without a bearer header and its 401 is shown inline instead of going
//! through the global redirect.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::net::types::LoginRequest;
use crate::util::auth::login_redirect_options;

use super::use_page;

const MISSING_INPUT: &str = "Ingrese usuario y contraseña.";
const BAD_CREDENTIALS: &str = "Nombre de usuario o contraseña incorrectos. Inténtalo de nuevo.";
const NO_TOKEN: &str = "Error al iniciar sesión, token no recibido.";

pub(crate) fn validate_login_input(username: &str, password: &str) -> Result<LoginRequest, &'static str> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(MISSING_INPUT);
    }
    Ok(LoginRequest { username: username.to_owned(), password: password.to_owned() })
}

/// Message for a failed login. Credential rejections and a missing token get
/// fixed text; anything else keeps its own message.
#[cfg(any(test, feature = "hydrate"))]
pub(crate) fn login_failure_message(error: &crate::net::error::ApiError) -> String {
    use crate::net::error::ApiError;
    match error {
        ApiError::Unauthorized | ApiError::Status { status: 400 | 401, .. } => BAD_CREDENTIALS.to_owned(),
        ApiError::Decode(_) => NO_TOKEN.to_owned(),
        other => other.user_message(),
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let page = use_page();
    let session = page.session;
    let navigate = use_navigate();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    // Visitors who already hold a token go straight to the dashboard.
    let navigate_home = navigate.clone();
    Effect::new(move || {
        let state = session.state().get();
        if !state.loading && state.is_authenticated && !busy.get_untracked() {
            navigate_home("/dashboard", login_redirect_options());
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let request = match validate_login_input(&username.get(), &password.get()) {
            Ok(request) => request,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set(String::new());

        #[cfg(feature = "hydrate")]
        {
            let client = page.client;
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::login(client, &request).await {
                    Ok(token) => {
                        session.login(&token, client.config().token_ttl_days);
                        navigate("/dashboard", login_redirect_options());
                    }
                    Err(e) => {
                        log::warn!("login failed: {e}");
                        info.set(login_failure_message(&e));
                    }
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (request, &navigate);
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Bienvenido"</h1>
                <p class="login-card__subtitle">"Por favor, inicia sesión para continuar"</p>
                <form class="login-form" on:submit=on_submit>
                    <label class="field">
                        <span class="field__label">"Nombre de Usuario"</span>
                        <input
                            class="login-input"
                            type="text"
                            autocomplete="username"
                            placeholder="Ingresa tu usuario"
                            prop:value=move || username.get()
                            on:input=move |ev| username.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="field">
                        <span class="field__label">"Contraseña"</span>
                        <input
                            class="login-input"
                            type="password"
                            autocomplete="current-password"
                            placeholder="Ingresa tu contraseña"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                    </label>
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Ingresando..." } else { "Iniciar Sesión" }}
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
