//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` owns the one `Session`, `ApiClient`, and `UiState` of the page and
//! installs them as context before any route renders. Every route except
//! `/login` sits under the `Protected` layout, which runs the access gate.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Outlet, ParentRoute, Redirect, Route, Router, Routes},
};

use crate::auth::token_store::TokenStore;
use crate::components::error_banner::ErrorBanner;
use crate::components::header::Header;
use crate::components::require_auth::RequireAuth;
use crate::components::sidebar::Sidebar;
use crate::config::ApiConfig;
use crate::net::http::{ApiClient, install_unauthorized_redirect};
use crate::pages::{
    clasificacion::ClasificacionPage, clientes::ClientesPage, corrales::CorralesPage, dashboard::DashboardPage,
    estado_lote::EstadoLotePage, gestion::GestionPage, login::LoginPage, lotes::LotesPage,
    produccion::ProduccionPage, productos::ProductosPage, razas::RazasPage, reportes::ReportesPage,
    usuarios::UsuariosPage, ventas::VentasPage,
};
use crate::state::auth::provide_session;
use crate::state::ui::UiState;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="es">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = provide_session(TokenStore::default());
    let client = ApiClient::new(ApiConfig::from_build_env(), session.store());
    install_unauthorized_redirect(client, session);
    provide_context(client);
    provide_context(RwSignal::new(UiState::default()));

    // Effects only run in the browser, so the server render stays in the
    // loading phase and the gate shows its placeholder.
    Effect::new(move || session.resolve());

    view! {
        <Stylesheet id="leptos" href="/pkg/granja-console.css"/>
        <Title text="Granja Avícola"/>

        <Router>
            <Routes fallback=|| view! { <Redirect path="/dashboard"/> }>
                <Route path=StaticSegment("login") view=LoginPage/>
                <ParentRoute path=StaticSegment("") view=Protected>
                    <Route path=StaticSegment("") view=|| view! { <Redirect path="/dashboard"/> }/>
                    <Route path=StaticSegment("dashboard") view=DashboardPage/>
                    <Route path=StaticSegment("lotes") view=LotesPage/>
                    <Route path=(StaticSegment("produccion"), ParamSegment("id")) view=ProduccionPage/>
                    <Route path=(StaticSegment("clasificacion"), ParamSegment("id")) view=ClasificacionPage/>
                    <Route path=(StaticSegment("estado"), ParamSegment("id")) view=EstadoLotePage/>
                    <Route path=StaticSegment("corrales") view=CorralesPage/>
                    <Route path=StaticSegment("razasg") view=RazasPage/>
                    <Route path=StaticSegment("gestion") view=GestionPage/>
                    <Route path=StaticSegment("cliente") view=ClientesPage/>
                    <Route path=StaticSegment("producto") view=ProductosPage/>
                    <Route path=StaticSegment("venta") view=VentasPage/>
                    <Route path=StaticSegment("reportes") view=ReportesPage/>
                    <Route path=StaticSegment("usuario") view=UsuariosPage/>
                </ParentRoute>
            </Routes>
        </Router>
    }
}

/// Console chrome around every authenticated screen.
#[component]
fn Protected() -> impl IntoView {
    view! {
        <RequireAuth>
            <div class="console">
                <Header/>
                <div class="console__body">
                    <Sidebar/>
                    <main class="console__main">
                        <ErrorBanner/>
                        <Outlet/>
                    </main>
                </div>
            </div>
        </RequireAuth>
    }
}
