//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render console chrome (gate, header, sidebar, error banner)
//! and the building blocks list screens share, reading session and UI state
//! from Leptos context.

pub mod date_filter;
pub mod error_banner;
pub mod field;
pub mod header;
pub mod line_chart;
pub mod lote_nav;
pub mod pagination;
pub mod require_auth;
pub mod sidebar;
