//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! The session is the only app-wide state. It is owned by the root component
//! and handed to pages through context rather than living in a global.

pub mod session;
