//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! The app shell picks a page from the guard's resolved view. Each page owns
//! its layout and delegates rendering details to `components`.

pub mod back_office;
pub mod front;
pub mod login;
pub mod not_found;
