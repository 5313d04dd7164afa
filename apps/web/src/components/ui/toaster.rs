//! Renders the toast queue held in the session context. Each toast disappears
//! after its deadline or when dismissed.

use crate::components::AlertKind;
use crate::features::auth::state::{now_ms, use_auth};
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use session_gate::{Notification, Severity};

#[component]
pub fn Toaster() -> impl IntoView {
    let notifications = use_auth().notifications;

    // One timer for the earliest deadline; re-armed whenever the queue changes.
    let timer = StoredValue::new_local(None::<Timeout>);
    Effect::new(move |_| {
        let deadline = notifications.with(|center| center.next_deadline());
        let next = deadline.map(|deadline| {
            let wait = deadline.saturating_sub(now_ms());
            Timeout::new(u32::try_from(wait).unwrap_or(u32::MAX), move || {
                let now = now_ms();
                notifications.update(|center| {
                    center.expire(now);
                });
            })
        });
        // Dropping the previous `Timeout` cancels it.
        timer.set_value(next);
    });

    view! {
        <div class="fixed top-4 right-4 z-50 flex w-80 flex-col gap-2" aria-live="assertive">
            <For
                each=move || notifications.with(|center| center.active().to_vec())
                key=|notification| notification.id
                let:notification
            >
                <Toast notification=notification />
            </For>
        </div>
    }
}

#[component]
fn Toast(notification: Notification) -> impl IntoView {
    let notifications = use_auth().notifications;
    let id = notification.id;
    let kind = match notification.severity {
        Severity::Success => AlertKind::Success,
        Severity::Error => AlertKind::Error,
    };

    view! {
        <div class=format!("{} flex items-start justify-between gap-3 shadow-md", kind.classes()) role="status">
            <span>{notification.message}</span>
            <button
                type="button"
                class="text-current opacity-60 hover:opacity-100"
                aria-label="Dismiss"
                on:click=move |_| {
                    notifications.update(|center| {
                        center.dismiss(id);
                    });
                }
            >
                "×"
            </button>
        </div>
    }
}
