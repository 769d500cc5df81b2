//! Login page: username + password sign-in.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;

use crate::nav::guard;
use crate::nav::routes::RouteTable;
use crate::net::types::{Credentials, LoginResult, Role};
use crate::state::session::{SessionError, SessionStore};
use crate::util::storage::KeyValueStore;

/// Trim and require both fields.
pub fn validate_login_input(username: &str, password: &str) -> Result<Credentials, &'static str> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err("Enter both username and password.");
    }
    Ok(Credentials {
        username: username.to_owned(),
        password: password.to_owned(),
    })
}

/// Adopt a login result and grant the role's menu set.
pub fn establish_session<S: KeyValueStore>(
    store: &mut SessionStore<S>,
    result: LoginResult,
    table: &RouteTable,
) -> Result<Role, SessionError> {
    let role = store.set_session(result)?;
    store.set_menus(table.menu_for_role(role));
    Ok(role)
}

/// Where to go after signing in: the `redirect` query value when it is a
/// local path, otherwise the role's landing page. The guard still vets it.
pub fn post_login_target(redirect: Option<&str>, role: Role) -> String {
    match redirect {
        Some(target) if is_local_path(target) => target.to_owned(),
        _ => guard::landing_for_role(Some(role)).to_owned(),
    }
}

/// A single leading `/` not followed by another `/` or `\`. Browsers read
/// `//host` and `/\host` as scheme-relative URLs.
fn is_local_path(target: &str) -> bool {
    let mut chars = target.chars();
    chars.next() == Some('/') && !matches!(chars.next(), Some('/' | '\\'))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    let session = expect_context::<RwSignal<crate::state::session::BrowserSession>>();
    #[cfg(feature = "hydrate")]
    let query = leptos_router::hooks::use_query_map();
    #[cfg(feature = "hydrate")]
    let navigate = leptos_router::hooks::use_navigate();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let credentials = match validate_login_input(&username.get(), &password.get()) {
            Ok(credentials) => credentials,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Signing in...".to_owned());

        #[cfg(feature = "hydrate")]
        {
            let redirect = query
                .with_untracked(|params| params.get(guard::REDIRECT_QUERY_KEY))
                .filter(|target| !target.is_empty());
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let established = match crate::net::api::login(&credentials).await {
                    Ok(result) => session
                        .try_update(|store| establish_session(store, result, &RouteTable::default()))
                        .ok_or_else(|| "session unavailable".to_owned())
                        .and_then(|established| established.map_err(|e| e.to_string())),
                    Err(e) => {
                        session.update(SessionStore::clear);
                        Err(e.to_string())
                    }
                };
                match established {
                    Ok(role) => {
                        info.set(String::new());
                        navigate(
                            &post_login_target(redirect.as_deref(), role),
                            leptos_router::NavigateOptions::default(),
                        );
                        if let Err(e) = crate::util::navigation::refresh_role_detail(session).await {
                            log::debug!("role detail not loaded after login: {e}");
                        }
                    }
                    Err(message) => info.set(format!("Sign in failed: {message}")),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = credentials;
            busy.set(false);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>{crate::config::APP_NAME}</h1>
                <p class="login-card__subtitle">"Sign in"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        placeholder="Username"
                        autocomplete="username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Sign In"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <p class="login-card__links">
                    <a href="/register">"Register"</a>
                    " · "
                    <a href="/forget">"Forgot password?"</a>
                </p>
            </div>
        </div>
    }
}
