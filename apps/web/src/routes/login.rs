use crate::app_lib::AppError;
use crate::components::{Alert, AlertKind, Button, Spinner};
use crate::features::auth::{client, state::use_auth};
use crate::routes::{AuthCard, INPUT_CLASS, LABEL_CLASS};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::{
    NavigateOptions,
    hooks::{use_navigate, use_query_map},
};
use session_gate::{LoginOutcome, LoginRequest, establish_session, paths::REDIRECT_PARAM};

#[derive(Clone)]
struct LoginInput {
    email: String,
    password: String,
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let query = use_query_map();
    let requested_return = move || query.with_untracked(|query| query.get(REDIRECT_PARAM));

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal::<Option<AppError>>(None);

    // Checked once on mount. Later revisions come from this screen's own login
    // and are handled by the action below.
    let navigate_signed_in = navigate.clone();
    Effect::new(move |_| {
        if untrack(|| auth.is_authenticated()) {
            let target = auth
                .session()
                .policy()
                .return_target(requested_return().as_deref());
            navigate_signed_in(
                &target,
                NavigateOptions {
                    replace: true,
                    ..NavigateOptions::default()
                },
            );
        }
    });

    let login_action = Action::new_local(move |input: &LoginInput| {
        let input = input.clone();
        let session = auth.session();
        let api = auth.api();
        let requested = requested_return();
        async move {
            let request = LoginRequest {
                email: input.email,
                password: input.password,
            };
            let response = client::login(&api, &request).await?;
            let outcome = establish_session(&session, &response, requested.as_deref())?;
            Ok::<LoginOutcome, AppError>(outcome)
        }
    });

    Effect::new(move |_| {
        if let Some(result) = login_action.value().get() {
            match result {
                Ok(outcome) => navigate(
                    outcome.destination(),
                    NavigateOptions {
                        replace: true,
                        ..NavigateOptions::default()
                    },
                ),
                Err(err) => set_error.set(Some(err)),
            }
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_error.set(None);

        let email_value = email.get_untracked().trim().to_string();
        let password_value = password.get_untracked();
        if email_value.is_empty() || password_value.trim().is_empty() {
            set_error.set(Some(AppError::Validation(
                "Email and password are required.".to_string(),
            )));
            return;
        }

        login_action.dispatch(LoginInput {
            email: email_value,
            password: password_value,
        });
    };

    view! {
        <AuthCard title="Sign in to EZRCM">
            <form on:submit=on_submit>
                <div class="mb-5">
                    <label class=LABEL_CLASS for="email">"Email"</label>
                    <input
                        id="email"
                        type="email"
                        class=INPUT_CLASS
                        autocomplete="email"
                        required
                        on:input=move |event| set_email.set(event_target_value(&event))
                    />
                </div>
                <div class="mb-5">
                    <label class=LABEL_CLASS for="password">"Password"</label>
                    <input
                        id="password"
                        type="password"
                        class=INPUT_CLASS
                        autocomplete="current-password"
                        required
                        on:input=move |event| set_password.set(event_target_value(&event))
                    />
                </div>
                <Button button_type="submit" disabled=login_action.pending()>
                    "Sign in"
                </Button>
                {move || {
                    login_action
                        .pending()
                        .get()
                        .then_some(view! { <div class="mt-4"><Spinner /></div> })
                }}
                {move || {
                    error
                        .get()
                        .map(|err| {
                            view! {
                                <div class="mt-4">
                                    <Alert kind=AlertKind::Error message=err.to_string() />
                                </div>
                            }
                        })
                }}
            </form>
        </AuthCard>
    }
}
