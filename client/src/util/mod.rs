//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pure helpers for the access gate, list screens, charts, reports, and form
//! parsing. Keeping them free of view code lets them be tested natively.

pub mod auth;
pub mod charts;
pub mod form;
pub mod listing;
pub mod reports;
