//! Stand-in body for CRUD screens served by their own view components.

use leptos::prelude::*;

#[component]
pub fn PlaceholderPanel(title: &'static str) -> impl IntoView {
    view! {
        <section class="placeholder-panel">
            <h2>{title}</h2>
            <p class="placeholder-panel__hint">"This screen is loaded from the records module."</p>
        </section>
    }
}
