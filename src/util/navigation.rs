//! Leptos glue for the navigation guard and session refresh.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components share one guard: the location is re-evaluated whenever it
//! or the session changes, the document title is applied, and redirects
//! replace the current history entry.

#[cfg(test)]
#[path = "navigation_test.rs"]
mod navigation_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::nav::guard::{self, Navigation};
use crate::nav::routes::RouteTable;
use crate::net::api::{FetchError, HttpProfileApi};
use crate::state::session::{BrowserSession, RoleDetail, SessionStore};
use crate::util::storage::KeyValueStore;

/// Join a router pathname and search string into one location.
/// The search string may or may not carry its leading `?`.
pub fn location_with_query(pathname: &str, search: &str) -> String {
    let search = search.trim_start_matches('?');
    if search.is_empty() {
        pathname.to_owned()
    } else {
        format!("{pathname}?{search}")
    }
}

/// Run the guard for the current location. Yields `None` until the session
/// has been read from storage, which happens after hydration, so the server
/// render and the first client render agree. Redirects are issued from an
/// effect; the returned memo tells the caller what to render.
pub fn use_navigation_guard(session: RwSignal<BrowserSession>, table: RouteTable) -> Memo<Option<Navigation>> {
    let location = use_location();
    let navigate = use_navigate();

    let navigation = Memo::new(move |_| {
        let destination = location_with_query(&location.pathname.get(), &location.search.get());
        session.with(|store| guard_when_loaded(&table, store, &destination))
    });

    Effect::new(move || {
        let Some(nav) = navigation.get() else {
            return;
        };
        if let Some(title) = nav.document_title.as_deref() {
            apply_document_title(title);
        }
        if let Some(href) = nav.decision.href() {
            navigate(
                &href,
                NavigateOptions {
                    replace: true,
                    ..NavigateOptions::default()
                },
            );
        }
    });

    navigation
}

/// Guard decision for `destination`, held back while `store` is still pending.
pub fn guard_when_loaded<S: KeyValueStore>(
    table: &RouteTable,
    store: &SessionStore<S>,
    destination: &str,
) -> Option<Navigation> {
    store
        .is_loaded()
        .then(|| guard::evaluate(table, store.session(), destination))
}

/// Read the persisted session once the app is running in the browser, then
/// refresh the role detail for the restored identity.
pub fn load_session_after_hydration(session: RwSignal<BrowserSession>) {
    Effect::new(move || {
        session.update(SessionStore::load_persisted);
        #[cfg(feature = "hydrate")]
        {
            leptos::task::spawn_local(async move {
                if let Err(e) = refresh_role_detail(session).await {
                    log::debug!("role detail not refreshed on startup: {e}");
                }
            });
        }
    });
}

/// Set `document.title`. No-op outside the browser.
pub fn apply_document_title(title: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
            doc.set_title(title);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = title;
    }
}

/// Fetch the role detail for the session's current identity and store it.
///
/// # Errors
///
/// Returns the fetch error, including [`FetchError::Superseded`] when the user
/// logged out or switched accounts while the request was in flight.
pub async fn refresh_role_detail(session: RwSignal<BrowserSession>) -> Result<Option<RoleDetail>, FetchError> {
    let pending = session.with_untracked(|store| {
        store
            .begin_role_fetch()
            .map(|fetch| (fetch, store.session().token.clone()))
    });
    let Some((fetch, token)) = pending else {
        return Ok(None);
    };
    let outcome = fetch.run(&HttpProfileApi::new(token)).await;
    let mut applied = Err(FetchError::Superseded);
    session.update(|store| applied = store.complete_role_fetch(fetch, outcome));
    applied
}
