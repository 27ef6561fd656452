use leptos::*;

use crate::{Converter, LogsPanel};

#[component]
pub fn ProgressSection(converter: Converter) -> impl IntoView {
    let percent = move || converter.progress.with(|p| p.percent);

    view! {
        <div class="progress-section" id="progressSection">
            <div class="progress-bar">
                <div class="progress-fill" id="progressFill" style:width=move || format!("{}%", percent())>
                    {move || format!("{}%", percent())}
                </div>
            </div>
            <div class="progress-message" id="progressMessage">
                {move || converter.progress.with(|p| p.message.clone())}
            </div>
            <LogsPanel logs=converter.logs.read_only()/>
        </div>
    }
}
