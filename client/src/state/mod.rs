//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`auth`, `ui`) so components depend on small
//! focused models. Screen data stays local to each page.

pub mod auth;
pub mod ui;
