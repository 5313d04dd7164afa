//! Landing page behind the guard. Loads the profile so an expired token is
//! detected (401) as soon as the user arrives.

use crate::components::{Alert, AlertKind, AppShell, Spinner};
use crate::features::{auth::state::use_auth, profile::client};
use leptos::prelude::*;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let profile = LocalResource::new(move || {
        let api = auth.api();
        async move { client::fetch_me(&api).await }
    });

    view! {
        <AppShell>
            <h1 class="text-2xl font-bold text-gray-900 dark:text-white">"Settings"</h1>
            <Suspense fallback=|| view! { <Spinner /> }>
                {move || {
                    profile
                        .get()
                        .map(|result| match result {
                            Ok(profile) => {
                                view! {
                                    <p class="mt-2 text-gray-600 dark:text-gray-300">
                                        {format!("Signed in as {}", profile.display_name())}
                                    </p>
                                }
                                    .into_any()
                            }
                            // Already reported through the session interceptor.
                            Err(err) if err.is_session_event() => ().into_any(),
                            Err(err) => {
                                view! {
                                    <div class="mt-4">
                                        <Alert kind=AlertKind::Error message=err.to_string() />
                                    </div>
                                }
                                    .into_any()
                            }
                        })
                }}
            </Suspense>
        </AppShell>
    }
}
