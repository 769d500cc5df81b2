//! Front-of-house shell: public pages and the patient's own pages.

#[cfg(test)]
#[path = "front_test.rs"]
mod front_test;

use leptos::prelude::*;

use crate::components::placeholder_panel::PlaceholderPanel;
use crate::components::profile_card::ProfileCard;
use crate::components::user_badge::UserBadge;
use crate::config::APP_NAME;
use crate::nav::routes::{RouteGroup, RouteTable, ViewId, join_path};
use crate::state::session::BrowserSession;

/// Header links for the front layout, in table order. Pages that require a
/// login only appear once signed in.
pub fn front_links(table: &RouteTable, logged_in: bool) -> Vec<(String, &'static str)> {
    table
        .routes()
        .iter()
        .filter(|route| route.group == RouteGroup::Front && !route.children.is_empty())
        .flat_map(|layout| {
            layout.children.iter().filter_map(move |child| {
                let title = child.meta.title?;
                (logged_in || !child.meta.requires_auth).then(|| (join_path(layout.path, child.path), title))
            })
        })
        .collect()
}

#[component]
pub fn FrontPage(view: ViewId, title: &'static str) -> impl IntoView {
    let session = expect_context::<RwSignal<BrowserSession>>();
    let links = move || front_links(&RouteTable::default(), session.with(|s| s.session().is_logged_in()));

    let content = match view {
        ViewId::Home => view! {
            <section class="front-home">
                <h1>{APP_NAME}</h1>
                <p>"Find a department, meet our doctors, and book an appointment online."</p>
            </section>
        }
        .into_any(),
        ViewId::Profile => view! { <ProfileCard/> }.into_any(),
        _ => view! { <PlaceholderPanel title=title/> }.into_any(),
    };

    view! {
        <div class="front-layout">
            <header class="front-header">
                <a class="front-header__brand" href="/">{APP_NAME}</a>
                <nav class="front-header__nav">
                    {move || {
                        links()
                            .into_iter()
                            .map(|(href, label)| view! { <a href=href>{label}</a> })
                            .collect_view()
                    }}
                </nav>
                <UserBadge/>
            </header>
            <main class="front-content">{content}</main>
        </div>
    }
}
