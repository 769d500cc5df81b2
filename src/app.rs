//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every location goes through one guarded view. The declarative route table
//! decides what is shown; `leptos_router` only supplies the location.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment, WildcardSegment,
    components::{Route, Router, Routes},
};

use crate::config::APP_NAME;
use crate::nav::guard::{Decision, Navigation};
use crate::nav::routes::{RouteGroup, RouteTable, ViewId};
use crate::pages::{back_office::BackOfficePage, front::FrontPage, login::LoginPage, not_found::NotFoundPage};
use crate::state::session::{BrowserSession, SessionStore};
use crate::util::navigation::{load_session_after_hydration, use_navigation_guard};
use crate::util::storage::BrowserStorage;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Owns the session and provides it to every page through context. The
/// session starts pending and is read from storage after hydration.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = RwSignal::new(SessionStore::pending(BrowserStorage));
    provide_context(session);
    load_session_after_hydration(session);

    view! {
        <Stylesheet id="leptos" href="/pkg/hospital-client.css"/>
        <Title text=APP_NAME/>

        <Router>
            <Routes fallback=|| view! { <NotFoundPage/> }>
                <Route path=StaticSegment("") view=GuardedView/>
                <Route path=WildcardSegment("any") view=GuardedView/>
            </Routes>
        </Router>
    }
}

/// Renders the destination once the guard lets it through. Nothing is shown
/// while the session is loading or a redirect is pending.
#[component]
fn GuardedView() -> impl IntoView {
    let session = expect_context::<RwSignal<BrowserSession>>();
    let navigation = use_navigation_guard(session, RouteTable::default());

    move || {
        match navigation.get() {
            Some(Navigation {
                decision: Decision::Proceed,
                view: Some(view),
                group,
                title,
                ..
            }) => render_view(view, group, title.unwrap_or(APP_NAME)),
            _ => ().into_any(),
        }
    }
}

fn render_view(view: ViewId, group: Option<RouteGroup>, title: &'static str) -> AnyView {
    match (view, group) {
        (ViewId::Login, _) => view! { <LoginPage/> }.into_any(),
        (ViewId::NotFound, _) | (_, Some(RouteGroup::Error)) => view! { <NotFoundPage/> }.into_any(),
        (ViewId::FrontLayout | ViewId::BackOfficeLayout, _) => ().into_any(),
        (_, Some(RouteGroup::BackOffice)) => view! { <BackOfficePage view=view title=title/> }.into_any(),
        _ => view! { <FrontPage view=view title=title/> }.into_any(),
    }
}
