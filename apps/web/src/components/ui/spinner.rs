use leptos::prelude::*;

/// Busy indicator. `label` is announced to screen readers and, when given,
/// shown next to the wheel.
#[component]
pub fn Spinner(#[prop(optional)] label: Option<&'static str>) -> impl IntoView {
    view! {
        <div class="inline-flex items-center gap-3" role="status" aria-live="polite">
            <div
                class="h-7 w-7 animate-spin rounded-full border-4 border-blue-200 border-t-blue-600"
                aria-hidden="true"
            ></div>
            <span class:sr-only=label.is_none() class="text-sm text-gray-600 dark:text-gray-300">
                {label.unwrap_or("Loading")}
            </span>
        </div>
    }
}
