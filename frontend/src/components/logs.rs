//! Conversion log panel.
//!
//! Shows the latest full log snapshot received from the status endpoint
//! and keeps the view scrolled to the bottom.

use leptos::*;

use crate::LogEntry;

/// Log panel component (display only, the controller replaces the lines).
#[component]
pub fn LogsPanel(
    /// Signal for logs data
    logs: ReadSignal<Vec<LogEntry>>,
) -> impl IntoView {
    // Reference to the logs content div for auto-scroll
    let logs_container = create_node_ref::<leptos::html::Div>();

    // Auto-scroll to bottom when logs change
    create_effect(move |_| {
        // Track logs changes
        let _ = logs.get();

        if let Some(container) = logs_container.get() {
            // Wait for the DOM update before measuring
            request_animation_frame(move || {
                container.set_scroll_top(container.scroll_height());
            });
        }
    });

    view! {
        <div class="logs-panel">
            <div class="logs-header">
                <span class="logs-title">"📋 处理日志"</span>
            </div>
            <div class="logs-content" id="logContainer" node_ref=logs_container>
                <For
                    each=move || logs.get().into_iter().enumerate()
                    key=|(i, entry)| (*i, entry.message.clone())
                    children=move |(_, entry)| {
                        view! {
                            <div class=format!("log-entry {}", entry.level.css_class())>
                                {entry.message}
                            </div>
                        }
                    }
                />
            </div>
        </div>
    }
}
