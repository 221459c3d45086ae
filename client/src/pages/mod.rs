//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration: it loads its rows through
//! `net::api`, keeps them in page-local signals, and delegates rendering
//! details to `components`. Mutating controls are rendered only when the
//! session allows the matching `Capability`.

pub mod clasificacion;
pub mod clientes;
pub mod corrales;
pub mod dashboard;
pub mod estado_lote;
pub mod gestion;
pub mod login;
pub mod lotes;
pub mod produccion;
pub mod productos;
pub mod razas;
pub mod reportes;
pub mod usuarios;
pub mod ventas;

use std::future::Future;

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::net::error::ApiError;
use crate::net::http::ApiClient;
use crate::state::auth::{Session, use_session};
use crate::state::ui::UiState;
use crate::util::form::parse_choice;

/// Context every screen reads.
#[derive(Clone, Copy)]
pub(crate) struct PageContext {
    pub session: Session,
    pub client: ApiClient,
    pub ui: RwSignal<UiState>,
}

pub(crate) fn use_page() -> PageContext {
    PageContext {
        session: use_session(),
        client: expect_context::<ApiClient>(),
        ui: expect_context::<RwSignal<UiState>>(),
    }
}

/// Run `request` in the browser and report a failure in the error banner.
///
/// 401s are not reported: the unauthorized hook has already logged out and
/// left the page.
pub(crate) fn spawn_request<F>(ui: RwSignal<UiState>, request: F)
where
    F: Future<Output = Result<(), ApiError>> + 'static,
{
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        if let Err(e) = request.await {
            if !e.is_unauthorized() {
                log::warn!("request failed: {e}");
                ui.update(|u| u.show_error(e.user_message()));
            }
        }
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = (ui, request);
}

/// The `:id` route parameter, when it is a positive integer.
pub(crate) fn use_route_id() -> Memo<Option<i64>> {
    let params = use_params_map();
    Memo::new(move |_| params.with(|p| p.get("id")).and_then(|raw| parse_choice(&raw).ok()))
}
