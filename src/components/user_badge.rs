//! Signed-in identity plus the logout action.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::nav::guard::LOGIN_PATH;
use crate::state::session::{BrowserSession, SessionStore};

/// Shows "Sign in" when logged out; otherwise the user's name, role, and a
/// logout button that clears the session and returns to the login page.
#[component]
pub fn UserBadge() -> impl IntoView {
    let session = expect_context::<RwSignal<BrowserSession>>();
    let navigate = use_navigate();

    let identity = move || {
        session.with(|store| {
            let s = store.session();
            s.is_logged_in().then(|| {
                let name = s
                    .user_info
                    .as_ref()
                    .map_or_else(|| "user".to_owned(), |u| u.display_name().to_owned());
                let role = s.role.map(|r| r.as_code().to_owned()).unwrap_or_default();
                (name, role)
            })
        })
    };

    let on_logout = move |_| {
        session.update(SessionStore::clear);
        navigate(LOGIN_PATH, NavigateOptions::default());
    };

    view! {
        <div class="user-badge">
            {move || match identity() {
                Some((name, role)) => view! {
                    <span class="user-badge__name">{name}</span>
                    <span class="user-badge__role">{role}</span>
                    <button class="btn user-badge__logout" on:click=on_logout.clone()>
                        "Log out"
                    </button>
                }
                    .into_any(),
                None => view! { <a class="user-badge__login" href=LOGIN_PATH>"Sign in"</a> }.into_any(),
            }}
        </div>
    }
}
