use crate::components::Spinner;
use crate::features::auth::state::use_auth;
use leptos::prelude::*;
use leptos_router::{
    NavigateOptions,
    hooks::{use_location, use_navigate},
};
use session_gate::{GuardState, RouteGuard, TokenCheck};

/// Renders `children` only after the stored token has been checked.
///
/// Runs on mount, on every path change and on every session revision. Until the
/// check allows the path, and while redirecting, only a placeholder is shown.
/// UX only: the API still validates the bearer token on every request.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let location = use_location();
    let navigate = use_navigate();

    let guard = StoredValue::new(RouteGuard::new(auth.session().policy().clone()));
    let state = RwSignal::new(
        guard.with_value(|guard| guard.initial_state(&location.pathname.get_untracked())),
    );

    Effect::new(move |_| {
        let path = location.pathname.get();
        auth.revision.track();

        let session = auth.session();
        let check = TokenCheck::new(session.store());
        let Some(next) = guard.try_update_value(|guard| guard.evaluate(&path, &check)) else {
            return;
        };

        if let GuardState::Redirecting { to } = &next {
            navigate(
                to,
                NavigateOptions {
                    replace: true,
                    ..NavigateOptions::default()
                },
            );
        }
        state.set(next);
    });

    view! {
        <Show
            when=move || state.with(GuardState::renders_children)
            fallback=|| view! { <GuardPlaceholder /> }
        >
            {children()}
        </Show>
    }
}

#[component]
fn GuardPlaceholder() -> impl IntoView {
    view! {
        <div class="flex min-h-[50vh] items-center justify-center">
            <Spinner label="Checking your session" />
        </div>
    }
}
