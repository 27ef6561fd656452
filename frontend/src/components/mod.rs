//! UI Components for the converter.
//!
//! This module contains all Leptos components organized by function:
//!
//! # Layout Components
//! - [`Header`] - Title bar with service status
//! - [`Hero`] - Main title and description
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`UploadSection`] - PDF selection with drag & drop, upload button
//! - [`ProgressSection`] - Progress bar, status message and logs
//! - [`LogsPanel`] - Latest log snapshot with auto-scroll
//! - [`ResultSection`] - Statistics, download and Markdown preview
//! - [`TaskHistory`] - Tasks known to the server
//! - [`ErrorBanner`] - Single user-facing error message

mod header;
mod hero;
mod upload;
mod progress;
mod result;
mod history;
mod notice;
mod footer;
mod logs;

pub use header::*;
pub use hero::*;
pub use upload::*;
pub use progress::*;
pub use result::*;
pub use history::*;
pub use notice::*;
pub use footer::*;
pub use logs::*;
