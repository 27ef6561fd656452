//! Error banner.

use leptos::*;

/// Single banner for user-facing errors; shows whatever the last error was.
#[component]
pub fn ErrorBanner(error: RwSignal<Option<String>>) -> impl IntoView {
    view! {
        <Show
            when=move || error.with(Option::is_some)
            fallback=|| view! { }
        >
            <div class="error-message" id="errorMessage">
                {move || error.get().unwrap_or_default()}
            </div>
        </Show>
    }
}
