//! Shared layout for signed-in screens: header, settings navigation and the
//! sign-out button. Hiding links here is cosmetic; the API enforces access.

use crate::app_lib::GIT_COMMIT_HASH;
use crate::components::{Button, ButtonVariant};
use crate::features::auth::state::use_auth;
use leptos::{prelude::*, task::spawn_local};
use leptos_router::{components::A, hooks::use_location};

/// Settings sections reachable from the navigation.
const SECTIONS: &[(&str, &str)] = &[
    ("/", "Dashboard"),
    ("/settings/entities", "Entities"),
    ("/settings/payers", "Payers"),
    ("/settings/codes", "Codes"),
    ("/settings/roles", "Roles"),
    ("/settings/permissions", "Permissions"),
    ("/settings/security", "Security"),
];

#[component]
pub fn AppShell(children: Children) -> impl IntoView {
    let auth = use_auth();
    let location = use_location();
    let (signing_out, set_signing_out) = signal(false);

    let on_sign_out = move |_| {
        if signing_out.get_untracked() {
            return;
        }
        set_signing_out.set(true);
        let session = auth.session();
        let api = auth.api();
        spawn_local(async move {
            session_gate::logout(&session, &api).await;
            set_signing_out.set(false);
        });
    };

    view! {
        <div class="min-h-screen flex flex-col">
            <header class="border-b border-gray-200 dark:border-gray-800 dark:bg-gray-900">
                <div class="max-w-screen-xl flex flex-wrap items-center justify-between mx-auto p-4">
                    <A href="/" {..} class="flex items-center space-x-3">
                        <span class="font-semibold whitespace-nowrap dark:text-white">
                            "EZRCM Settings"
                        </span>
                    </A>
                    <Show when=move || auth.is_authenticated()>
                        <Button variant=ButtonVariant::Secondary disabled=signing_out {..} on:click=on_sign_out>
                            "Sign Out"
                        </Button>
                    </Show>
                </div>
            </header>
            <div class="flex flex-1">
                <nav class="w-56 flex-shrink-0 hidden md:block border-r border-gray-200 dark:border-gray-800 px-4 py-6">
                    <ul class="space-y-1">
                        {SECTIONS
                            .iter()
                            .map(|(target, label)| {
                                let target = *target;
                                let active = move || {
                                    let path = location.pathname.get();
                                    if target == "/" { path == "/" } else { path.starts_with(target) }
                                };
                                view! {
                                    <li>
                                        <A
                                            href=target
                                            {..}
                                            class="block rounded px-2 py-1.5 text-sm text-gray-700 hover:bg-gray-100 dark:text-gray-300 dark:hover:bg-gray-800"
                                            class:font-semibold=active
                                        >
                                            {*label}
                                        </A>
                                    </li>
                                }
                            })
                            .collect_view()}
                    </ul>
                </nav>
                <main class="flex-1">
                    <div class="container mx-auto p-4 mt-6">{children()}</div>
                </main>
            </div>
            <footer class="px-4 py-2 text-right text-xs text-gray-400">
                {format!("v{} ({})", env!("CARGO_PKG_VERSION"), short_commit(GIT_COMMIT_HASH))}
            </footer>
        </div>
    }
}

fn short_commit(hash: &str) -> &str {
    hash.get(..7).unwrap_or(hash)
}
