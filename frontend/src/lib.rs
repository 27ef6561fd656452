//! PDF to Markdown - Frontend Rust/Leptos Application
//!
//! A WebAssembly frontend that uploads a PDF to the conversion service,
//! polls the task until it finishes and shows the generated Markdown.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Header (service status)                                     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  MainContent                                                 │
//! │  ├── Hero (title, description)                              │
//! │  ├── ErrorBanner                                            │
//! │  ├── UploadSection (drop zone, picker, upload button)       │
//! │  ├── ProgressSection + LogsPanel (while busy)               │
//! │  ├── ResultSection (when completed)                         │
//! │  └── TaskHistory                                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`types`] - Common types (StatusResponse, LogEntry, AppError, etc.)
//! - [`format`] - Pure display helpers (sizes, grouping, preview)
//! - [`session`] - Upload/poll state machine
//! - [`controller`] - Reactive glue driving the session
//! - [`components`] - UI components
//! - [`services`] - Backend communication

use leptos::*;
use leptos_router::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod format;
pub mod session;
pub mod controller;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{
    // Files
    FileMeta,
    // Logs
    LogEntry, LogLevel,
    // API
    HealthResponse, StatusResponse, Summary, TaskList, TaskRecord, TaskResult, TaskStatus,
    UploadResponse,
    // Errors
    AppError, AppResult,
};

// Session
pub use session::{Phase, Session};
pub use controller::{CompletedTask, Converter, ProgressView};

// Components
pub use components::*;

// =============================================================================
// Application
// =============================================================================

#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn MainContent() -> impl IntoView {
    // Lives as long as the page
    let converter = Converter::new();

    converter.probe_health();
    converter.refresh_tasks();

    view! {
        <Header converter=converter/>

        <div class="container">
            <Hero/>

            <ErrorBanner error=converter.error/>

            <UploadSection converter=converter/>

            // Progress is only visible while uploading or polling
            <Show
                when=move || converter.phase.with(Phase::is_busy)
                fallback=|| view! { }
            >
                <ProgressSection converter=converter/>
            </Show>

            <Show
                when=move || converter.result.with(Option::is_some)
                fallback=|| view! { }
            >
                <ResultSection converter=converter/>
            </Show>

            <TaskHistory converter=converter/>
        </div>

        <Footer/>
    }
}
