//! Session context for the portal. `SessionProvider` assembles the credential
//! store, the session controller and the request client once, and registers the
//! 401/403 handlers that every API call reports to. It must be mounted inside the
//! router: the 401 reaction navigates with the router, not with page state.

use crate::app_lib::{ApiClient, AppConfig};
use crate::features::auth::storage::{DocumentCookies, DurableStorage, TabStorage};
use leptos::prelude::*;
use leptos_router::{NavigateOptions, hooks::use_navigate};
use session_gate::{
    CredentialStore, Navigator, NotificationCenter, Notifier, PathPolicy, Session,
    SessionEventHub, SessionEvents,
};
use std::rc::Rc;
use tracing::debug;

/// Session handles shared through Leptos context. All fields are `Copy` handles.
#[derive(Clone, Copy)]
pub struct AuthContext {
    session: StoredValue<Rc<Session>, LocalStorage>,
    api: StoredValue<ApiClient, LocalStorage>,
    /// Bumped on login, logout and 401 so mounted guards re-check storage.
    pub revision: RwSignal<u64>,
    pub notifications: RwSignal<NotificationCenter>,
}

impl AuthContext {
    pub fn session(&self) -> Rc<Session> {
        self.session.get_value()
    }

    pub fn api(&self) -> ApiClient {
        self.api.get_value()
    }

    /// Reactive: re-runs when the revision changes.
    pub fn is_authenticated(&self) -> bool {
        self.revision.track();
        self.session.with_value(|session| session.store().has_session())
    }
}

/// Navigation through the router, always replacing the current entry.
struct RouterNavigator<F> {
    navigate: F,
    revision: RwSignal<u64>,
}

impl<F> Navigator for RouterNavigator<F>
where
    F: Fn(&str, NavigateOptions),
{
    fn replace(&self, path: &str) {
        (self.navigate)(
            path,
            NavigateOptions {
                replace: true,
                ..NavigateOptions::default()
            },
        );
    }

    fn refresh(&self) {
        self.revision
            .update(|revision| *revision = revision.wrapping_add(1));
    }
}

/// Pushes messages onto the toast queue rendered by `Toaster`.
struct ToastNotifier {
    notifications: RwSignal<NotificationCenter>,
}

impl Notifier for ToastNotifier {
    fn error(&self, message: &str) {
        let now = now_ms();
        self.notifications.update(|center| {
            center.error(message, now);
        });
    }
}

/// Milliseconds since the epoch, as the toast queue expects.
pub fn now_ms() -> u64 {
    let now = js_sys::Date::now();
    if now.is_finite() && now > 0.0 {
        now as u64
    } else {
        0
    }
}

#[component]
pub fn SessionProvider(children: Children) -> impl IntoView {
    let config = AppConfig::load();
    let revision = RwSignal::new(0_u64);
    let notifications = RwSignal::new(NotificationCenter::default());

    let store = CredentialStore::new(
        Rc::new(DurableStorage),
        Rc::new(TabStorage),
        Rc::new(DocumentCookies),
    )
    .with_keys(config.storage_keys())
    .with_cookie_max_age(config.session_max_age_seconds);

    let session = Rc::new(Session::new(
        store.clone(),
        PathPolicy::default(),
        Rc::new(RouterNavigator {
            navigate: use_navigate(),
            revision,
        }),
        Rc::new(ToastNotifier { notifications }),
    ));

    let hub = Rc::new(SessionEventHub::new());
    hub.register_session(&session);

    let events: Rc<dyn SessionEvents> = hub.clone();
    let api = ApiClient::new(&config, store, events);

    debug!("Session event handlers registered");

    let hub = StoredValue::new_local(hub);
    on_cleanup(move || {
        hub.try_with_value(|hub| hub.clear_handlers());
        debug!("Session event handlers cleared");
    });

    provide_context(AuthContext {
        session: StoredValue::new_local(session),
        api: StoredValue::new_local(api),
        revision,
        notifications,
    });

    view! { {children()} }
}

pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}
