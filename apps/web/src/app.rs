use crate::components::Toaster;
use crate::features::auth::state::SessionProvider;
use crate::routes::AppRoutes;
use leptos::prelude::*;
use leptos_router::components::Router;

/// The session provider sits inside the router so the 401 reaction can navigate
/// without depending on whichever page is mounted.
#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <SessionProvider>
                <AppRoutes />
                <Toaster />
            </SessionProvider>
        </Router>
    }
}
