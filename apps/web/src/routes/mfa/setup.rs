use crate::app_lib::AppError;
use crate::components::{Alert, AlertKind, Button};
use crate::features::auth::state::{now_ms, use_auth};
use crate::routes::AuthCard;
use leptos::prelude::*;
use leptos_router::{NavigateOptions, components::A, hooks::use_navigate};
use session_gate::{
    login::complete_mfa_setup,
    paths::{HOME_PATH, LOGIN_PATH},
};

/// Placeholder for second-factor enrollment. Enrollment itself happens on the
/// backend's own screens; this step only acknowledges it and moves on.
#[component]
pub fn MfaSetupPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let store = auth.session().store().clone();
    let (error, set_error) = signal::<Option<AppError>>(None);

    if store.mfa_setup().is_none() || !store.has_session() {
        return view! {
            <AuthCard title="Set up verification">
                <Alert
                    kind=AlertKind::Info
                    message="There is no pending verification setup.".to_string()
                />
                <A href=LOGIN_PATH {..} class="block text-center text-sm text-blue-700 hover:underline">
                    "Back to sign in"
                </A>
            </AuthCard>
        }
        .into_any();
    }

    let on_continue = move |_| {
        set_error.set(None);
        match complete_mfa_setup(&auth.session()) {
            Ok(()) => {
                let now = now_ms();
                auth.notifications.update(|center| {
                    center.success("Two-step verification is set up.", now);
                });
                navigate(
                    HOME_PATH,
                    NavigateOptions {
                        replace: true,
                        ..NavigateOptions::default()
                    },
                );
            }
            Err(err) => set_error.set(Some(err.into())),
        }
    };

    view! {
        <AuthCard title="Set up verification">
            <p class="text-sm text-gray-600 dark:text-gray-300">
                "Your account requires a second sign-in factor. Enroll an authenticator app, then continue."
            </p>
            <Button {..} on:click=on_continue>
                "Continue"
            </Button>
            {move || {
                error
                    .get()
                    .map(|err| view! { <Alert kind=AlertKind::Error message=err.to_string() /> })
            }}
        </AuthCard>
    }
    .into_any()
}
