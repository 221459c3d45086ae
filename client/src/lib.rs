//! # client
//!
//! Leptos + WASM admin console for a poultry farm: lotes, corrales, razas,
//! production, classification, flock status, sales, and user accounts,
//! all backed by a remote REST API.
//!
//! The bearer token is the only session credential. `auth` stores and
//! decodes it, `state::auth` turns it into the session every screen reads,
//! and `net::http` attaches it to requests and reacts to 401s.

pub mod app;
pub mod auth;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: install logging and hydrate the server render.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    // Fails only when a logger is already installed.
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
