//! Networking modules for the hospital REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs the HTTP calls and unwraps the response envelope; `types`
//! defines the shared wire schema.

pub mod api;
pub mod types;
