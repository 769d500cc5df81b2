//! Reusable UI components shared by the front and back-office shells.
//!
//! ARCHITECTURE
//! ============
//! Components read the session from context and keep rendering decisions in
//! small pure helpers so they can be tested without a browser.

pub mod placeholder_panel;
pub mod profile_card;
pub mod user_badge;
