//! Credential handling for the console.
//!
//! SYSTEM CONTEXT
//! ==============
//! `token_store` persists the bearer token, `roles` reads role claims out of
//! it, and `policy` turns roles into per-action visibility. Session state
//! built on these lives in `state::auth`.

pub mod policy;
pub mod roles;
pub mod token_store;
