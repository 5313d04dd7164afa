mod dashboard;
mod login;
mod mfa;
mod not_found;
mod settings;

pub(crate) use dashboard::DashboardPage;
pub(crate) use login::LoginPage;
pub(crate) use mfa::{MfaSetupPage, MfaVerifyPage};
pub(crate) use not_found::NotFoundPage;
pub(crate) use settings::SettingsPage;

use crate::features::auth::RequireAuth;
use leptos::prelude::*;
use leptos_router::components::{Route, Routes};
use leptos_router::path;

/// Public screens are mounted bare; everything else sits behind `RequireAuth`.
#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Routes fallback=|| view! { <RequireAuth><NotFoundPage /></RequireAuth> }>
            <Route path=path!("/login") view=LoginPage />
            <Route path=path!("/authentication/verify") view=MfaVerifyPage />
            <Route path=path!("/authentication/setup") view=MfaSetupPage />
            <Route
                path=path!("/")
                view=|| view! { <RequireAuth><DashboardPage /></RequireAuth> }
            />
            <Route
                path=path!("/settings/:section")
                view=|| view! { <RequireAuth><SettingsPage /></RequireAuth> }
            />
        </Routes>
    }
}

/// Centered card used by the sign-in screens.
#[component]
pub(crate) fn AuthCard(title: &'static str, children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen flex items-center justify-center px-4">
            <div class="w-full max-w-sm space-y-6">
                <h1 class="text-2xl font-bold text-center text-gray-900 dark:text-white">
                    {title}
                </h1>
                {children()}
            </div>
        </div>
    }
}

pub(crate) const INPUT_CLASS: &str = "bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:placeholder-gray-400 dark:text-white";
pub(crate) const LABEL_CLASS: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";
