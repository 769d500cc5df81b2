//! # hospital-client
//!
//! Leptos + WASM front end for the hospital management system.
//!
//! The crate owns the browser-side authentication session and the navigation
//! guard that gates every route on it. Pages and components are thin shells
//! over those two; the records screens they host are out of scope here.

pub mod app;
pub mod components;
pub mod config;
pub mod nav;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        leptos::logging::warn!("console logger already initialized");
    }
    leptos::mount::hydrate_body(app::App);
}
