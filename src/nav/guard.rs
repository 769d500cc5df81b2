//! Navigation guard: one allow/redirect decision per navigation attempt.
//!
//! SYSTEM CONTEXT
//! ==============
//! The app shell calls [`evaluate`] for every location change and applies the
//! returned title and decision. The guard itself is pure: it reads the
//! resolved route and the session and performs no I/O.
//!
//! Rules, first match wins:
//! 1. Route requires auth and the session is logged out: go to `/login`,
//!    carrying the intended path in `redirect`.
//! 2. Logged in on `/login`: go to the role's landing page.
//! 3. Logged-in patient: back-office paths go to `/`, everything else proceeds.
//! 4. Logged-in staff: back-office paths proceed, everything else goes to the
//!    back-office landing page.
//! 5. Logged out: back-office paths go to `/login`, everything else proceeds.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use super::routes::{ResolvedRoute, RouteGroup, RouteTable, ViewId};
use crate::config;
use crate::net::types::Role;
use crate::state::session::Session;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";
pub const BACK_OFFICE_PREFIX: &str = "/back";
pub const BACK_OFFICE_HOME: &str = "/back/dashboard";
/// Query key carrying the post-login destination.
pub const REDIRECT_QUERY_KEY: &str = "redirect";

/// Outcome of one navigation attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    Proceed,
    Redirect(Redirect),
}

/// Redirect target with an optional post-login destination.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Redirect {
    pub path: &'static str,
    pub return_to: Option<String>,
}

impl Redirect {
    #[must_use]
    pub fn to(path: &'static str) -> Self {
        Self { path, return_to: None }
    }

    /// Location string for the router, e.g. `/login?redirect=/appointment`.
    #[must_use]
    pub fn href(&self) -> String {
        match &self.return_to {
            Some(target) => format!("{}?{REDIRECT_QUERY_KEY}={}", self.path, encode_query_value(target)),
            None => self.path.to_owned(),
        }
    }
}

impl Decision {
    fn redirect(path: &'static str) -> Self {
        Decision::Redirect(Redirect::to(path))
    }

    #[must_use]
    pub fn href(&self) -> Option<String> {
        match self {
            Decision::Proceed => None,
            Decision::Redirect(redirect) => Some(redirect.href()),
        }
    }
}

/// Everything the shell needs to act on a navigation attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigation {
    pub decision: Decision,
    /// Document title for the destination, if its route declares one.
    pub document_title: Option<String>,
    /// View to render when the decision is [`Decision::Proceed`].
    pub view: Option<ViewId>,
    pub group: Option<RouteGroup>,
    /// Destination title, unsuffixed.
    pub title: Option<&'static str>,
}

/// Resolve `destination` and decide how to handle it.
#[must_use]
pub fn evaluate(table: &RouteTable, session: &Session, destination: &str) -> Navigation {
    let target = table.resolve(destination);
    let decision = decide(&target, session);
    log::debug!("navigate {} -> {decision:?}", target.full_path);
    Navigation {
        document_title: target.title().map(config::document_title),
        view: target.view(),
        group: target.group(),
        title: target.title(),
        decision,
    }
}

/// Apply the guard rules to an already resolved destination.
#[must_use]
pub fn decide(target: &ResolvedRoute, session: &Session) -> Decision {
    let logged_in = session.is_logged_in();

    if target.requires_auth() && !logged_in {
        return Decision::Redirect(Redirect {
            path: LOGIN_PATH,
            return_to: Some(target.full_path.clone()),
        });
    }

    let back_office = is_back_office(&target.path);
    if logged_in {
        if target.path == LOGIN_PATH {
            return Decision::redirect(landing_path(session));
        }
        if session.is_user() {
            return if back_office { Decision::redirect(HOME_PATH) } else { Decision::Proceed };
        }
        return if back_office { Decision::Proceed } else { Decision::redirect(BACK_OFFICE_HOME) };
    }

    if back_office {
        return Decision::redirect(LOGIN_PATH);
    }
    Decision::Proceed
}

/// Landing page for a logged-in session.
#[must_use]
pub fn landing_path(session: &Session) -> &'static str {
    landing_for_role(session.role)
}

/// Patients land on the front page; every other account lands in the back office.
#[must_use]
pub fn landing_for_role(role: Option<Role>) -> &'static str {
    if role == Some(Role::Patient) { HOME_PATH } else { BACK_OFFICE_HOME }
}

/// True for `/back` and anything beneath it. `/backup` is not back-office.
#[must_use]
pub fn is_back_office(path: &str) -> bool {
    path.strip_prefix(BACK_OFFICE_PREFIX)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// Characters escaped in a query value. Unreserved characters plus `/ : @`
/// stay readable.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/')
    .remove(b':')
    .remove(b'@');

/// Percent-encode `value` for use after `redirect=`.
#[must_use]
pub fn encode_query_value(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}
