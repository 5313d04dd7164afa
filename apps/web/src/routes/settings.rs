//! Placeholder settings screens. The CRUD pages are built elsewhere; these only
//! give the guard and the interceptor something real to protect.

use crate::components::{Alert, AlertKind, AppShell};
use crate::routes::not_found::NotFoundContent;
use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

const SECTIONS: &[(&str, &str)] = &[
    ("entities", "Entities"),
    ("payers", "Payers"),
    ("codes", "Codes"),
    ("roles", "Roles"),
    ("permissions", "Permissions"),
    ("security", "Security"),
];

#[component]
pub fn SettingsPage() -> impl IntoView {
    let params = use_params_map();
    let title = move || {
        params.with(|params| {
            let section = params.get("section")?;
            SECTIONS
                .iter()
                .find(|(slug, _)| *slug == section)
                .map(|(_, title)| *title)
        })
    };

    view! {
        <AppShell>
            {move || match title() {
                Some(title) => {
                    view! {
                        <h1 class="text-2xl font-bold text-gray-900 dark:text-white">{title}</h1>
                        <div class="mt-4">
                            <Alert
                                kind=AlertKind::Info
                                message=format!("{title} management is not available yet.")
                            />
                        </div>
                    }
                        .into_any()
                }
                None => view! { <NotFoundContent /> }.into_any(),
            }}
        </AppShell>
    }
}
