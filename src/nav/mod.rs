//! Declarative routing and the navigation guard.
//!
//! ARCHITECTURE
//! ============
//! `routes` holds the static route table and resolves locations against it;
//! `guard` turns a resolved destination plus the session into one decision.
//! Neither depends on `leptos_router`; the app shell adapts them.

pub mod guard;
pub mod routes;
