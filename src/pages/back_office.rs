//! Back-office shell: sidebar menu from the session plus the active screen.

use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::components::placeholder_panel::PlaceholderPanel;
use crate::components::profile_card::ProfileCard;
use crate::components::user_badge::UserBadge;
use crate::config::APP_NAME;
use crate::nav::routes::ViewId;
use crate::state::session::BrowserSession;

#[component]
pub fn BackOfficePage(view: ViewId, title: &'static str) -> impl IntoView {
    let session = expect_context::<RwSignal<BrowserSession>>();
    let location = use_location();

    let menus = move || session.with(|store| store.session().menus.clone());

    let content = match view {
        ViewId::Dashboard | ViewId::BackOfficeProfile => view! {
            <h2>{title}</h2>
            <ProfileCard/>
        }
        .into_any(),
        _ => view! { <PlaceholderPanel title=title/> }.into_any(),
    };

    view! {
        <div class="back-layout">
            <aside class="back-sidebar">
                <div class="back-sidebar__brand">{APP_NAME}</div>
                <nav class="back-sidebar__menu">
                    {move || {
                        let current = location.pathname.get();
                        menus()
                            .into_iter()
                            .map(|entry| {
                                let class = if entry.path == current {
                                    "back-sidebar__item back-sidebar__item--active"
                                } else {
                                    "back-sidebar__item"
                                };
                                view! {
                                    <a class=class href=entry.path data-icon=entry.icon>
                                        {entry.title}
                                    </a>
                                }
                            })
                            .collect_view()
                    }}
                </nav>
            </aside>
            <div class="back-main">
                <header class="back-header">
                    <span class="back-header__title">{title}</span>
                    <UserBadge/>
                </header>
                <main class="back-content">{content}</main>
            </div>
        </div>
    }
}
