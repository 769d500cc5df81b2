//! Build-time application configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! The WASM bundle has no process environment at runtime, so deploy-specific
//! values are baked in when the crate is compiled. Each value falls back to a
//! default when its variable is unset.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Application name appended to every document title.
pub const APP_NAME: &str = match option_env!("HOSPITAL_APP_NAME") {
    Some(name) => name,
    None => "Hospital Management System",
};

/// Path prefix for all REST calls, without a trailing slash.
pub const API_BASE: &str = match option_env!("HOSPITAL_API_BASE") {
    Some(base) => base,
    None => "/api",
};

/// Build an absolute API URL for `path` (which must start with `/`).
#[must_use]
pub fn api_url(path: &str) -> String {
    format!("{}{path}", API_BASE.trim_end_matches('/'))
}

/// Document title for a route title, suffixed with [`APP_NAME`].
#[must_use]
pub fn document_title(title: &str) -> String {
    format!("{title} - {APP_NAME}")
}
