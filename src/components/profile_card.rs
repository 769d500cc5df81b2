//! Identity card: account profile plus the role-specific record.

#[cfg(test)]
#[path = "profile_card_test.rs"]
mod profile_card_test;

use leptos::prelude::*;

use crate::net::api::FetchError;
use crate::net::types::UserProfile;
use crate::state::session::{BrowserSession, RoleDetail};

type Row = (&'static str, String);

fn push(rows: &mut Vec<Row>, label: &'static str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        rows.push((label, value.to_owned()));
    }
}

/// Labelled rows for the populated profile fields.
pub fn profile_rows(profile: &UserProfile) -> Vec<Row> {
    let mut rows = Vec::new();
    push(&mut rows, "Username", profile.username.as_deref());
    push(&mut rows, "Name", profile.name.as_deref());
    push(&mut rows, "Email", profile.email.as_deref());
    push(&mut rows, "Phone", profile.phone.as_deref());
    push(&mut rows, "Sex", profile.sex.as_deref());
    rows
}

/// Labelled rows for the populated role-detail fields.
pub fn detail_rows(detail: &RoleDetail) -> Vec<Row> {
    let mut rows = Vec::new();
    match detail {
        RoleDetail::Doctor(doctor) => {
            push(&mut rows, "Doctor No.", doctor.doctor_no.as_deref());
            push(
                &mut rows,
                "Department",
                doctor.department.as_ref().and_then(|d| d.name.as_deref()),
            );
            push(&mut rows, "Title", doctor.title.as_deref());
            push(&mut rows, "Expertise", doctor.expertise.as_deref());
            if let Some(status) = doctor.status {
                rows.push(("Status", if status == 1 { "Active" } else { "Inactive" }.to_owned()));
            }
        }
        RoleDetail::Patient(patient) => {
            push(&mut rows, "Patient No.", patient.patient_no.as_deref());
            push(&mut rows, "Birthday", patient.birthday.as_deref());
            push(&mut rows, "Address", patient.address.as_deref());
            push(&mut rows, "Medical History", patient.medical_history.as_deref());
            push(&mut rows, "Allergies", patient.allergies.as_deref());
        }
    }
    rows
}

fn render_rows(rows: Vec<Row>) -> impl IntoView {
    view! {
        <dl class="profile-card__rows">
            {rows
                .into_iter()
                .map(|(label, value)| view! {
                    <dt>{label}</dt>
                    <dd>{value}</dd>
                })
                .collect_view()}
        </dl>
    }
}

/// Message shown after a failed detail refresh. A superseded fetch belongs
/// to an identity that is gone, so it shows nothing.
pub fn refresh_error_message(err: &FetchError) -> Option<String> {
    match err {
        FetchError::Superseded => None,
        other => Some(format!("Could not load role details: {other}")),
    }
}

/// Card for the signed-in user, with a button to re-fetch the role detail.
#[component]
pub fn ProfileCard() -> impl IntoView {
    let session = expect_context::<RwSignal<BrowserSession>>();
    let detail_error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let profile = move || {
        session.with(|store| store.session().user_info.as_ref().map(profile_rows).unwrap_or_default())
    };
    let detail = move || session.with(|store| store.session().detail.as_ref().map(detail_rows));
    let has_detail_role = move || session.with(|store| store.begin_role_fetch().is_some());

    let on_refresh = move |_| {
        if busy.get() {
            return;
        }
        busy.set(true);
        detail_error.set(None);
        #[cfg(feature = "hydrate")]
        {
            leptos::task::spawn_local(async move {
                if let Err(err) = crate::util::navigation::refresh_role_detail(session).await {
                    detail_error.set(refresh_error_message(&err));
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            busy.set(false);
        }
    };

    view! {
        <section class="profile-card">
            <h2>"Account"</h2>
            {move || render_rows(profile())}
            <Show when=has_detail_role>
                {move || match detail() {
                    Some(rows) => render_rows(rows).into_any(),
                    None => view! { <p class="profile-card__empty">"No role details on file."</p> }.into_any(),
                }}
                <button class="btn profile-card__refresh" on:click=on_refresh disabled=move || busy.get()>
                    "Refresh"
                </button>
            </Show>
            <Show when=move || detail_error.get().is_some()>
                <p class="profile-card__error">{move || detail_error.get().unwrap_or_default()}</p>
            </Show>
        </section>
    }
}
