use leptos::prelude::*;

use crate::nav::guard::HOME_PATH;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="not-found">
            <h1>"404"</h1>
            <p>"The page you are looking for does not exist."</p>
            <a href=HOME_PATH>"Back to home"</a>
        </div>
    }
}
