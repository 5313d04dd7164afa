use crate::app_lib::AppError;
use crate::components::{Alert, AlertKind, Button, Spinner};
use crate::features::auth::{client, state::use_auth};
use crate::routes::{AuthCard, INPUT_CLASS, LABEL_CLASS};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::{NavigateOptions, components::A, hooks::use_navigate};
use session_gate::{
    LoginOutcome, MfaVerifyRequest, establish_session,
    paths::{HOME_PATH, LOGIN_PATH},
};

#[component]
pub fn MfaVerifyPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let pending_user = auth.session().store().mfa_pending();

    let (code, set_code) = signal(String::new());
    let (error, set_error) = signal::<Option<AppError>>(None);

    let verify_action = Action::new_local(move |request: &MfaVerifyRequest| {
        let request = request.clone();
        let session = auth.session();
        let api = auth.api();
        async move {
            let response = client::verify_mfa(&api, &request).await?;
            let outcome = establish_session(&session, &response, None)?;
            Ok::<LoginOutcome, AppError>(outcome)
        }
    });

    Effect::new(move |_| {
        if let Some(result) = verify_action.value().get() {
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

    let Some(user_id) = pending_user else {
        let store = auth.session().store().clone();
        if store.has_session() && store.is_mfa_verified() {
            return view! {
                <AuthCard title="Verification">
                    <Alert
                        kind=AlertKind::Success
                        message="This session is already verified.".to_string()
                    />
                    <A href=HOME_PATH {..} class="block text-center text-sm text-blue-700 hover:underline">
                        "Continue to the portal"
                    </A>
                </AuthCard>
            }
            .into_any();
        }
        return view! {
            <AuthCard title="Verification">
                <Alert
                    kind=AlertKind::Info
                    message="There is no sign-in waiting for a code.".to_string()
                />
                <A href=LOGIN_PATH {..} class="block text-center text-sm text-blue-700 hover:underline">
                    "Back to sign in"
                </A>
            </AuthCard>
        }
        .into_any();
    };

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_error.set(None);

        let code_value = code.get_untracked().trim().to_string();
        if code_value.is_empty() {
            set_error.set(Some(AppError::Validation("Enter the verification code.".to_string())));
            return;
        }

        verify_action.dispatch(MfaVerifyRequest {
            user_id: user_id.clone(),
            code: code_value,
        });
    };

    view! {
        <AuthCard title="Verification">
            <form on:submit=on_submit>
                <div class="mb-5">
                    <label class=LABEL_CLASS for="code">"Authentication code"</label>
                    <input
                        id="code"
                        type="text"
                        inputmode="numeric"
                        class=INPUT_CLASS
                        autocomplete="one-time-code"
                        required
                        on:input=move |event| set_code.set(event_target_value(&event))
                    />
                </div>
                <Button button_type="submit" disabled=verify_action.pending()>
                    "Verify"
                </Button>
                {move || {
                    verify_action
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
    .into_any()
}
