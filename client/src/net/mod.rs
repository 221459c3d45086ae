//! Networking modules for the farm API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` owns the request pipeline and 401 handling, `api` names the
//! endpoints, `types` defines the wire schema, and `error` the failure type
//! every call returns.

pub mod api;
pub mod error;
pub mod http;
pub mod types;
