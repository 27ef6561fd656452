//! Application configuration.
//!
//! Centralized configuration for the converter frontend.
//! The client is served by the conversion service itself, so every
//! endpoint is resolved against the page origin.

/// Backend API base URL.
///
/// Empty means "same origin as the page".
pub const API_BASE: &str = "";

/// Application name shown in the header.
pub const APP_NAME: &str = "PDF to Markdown";

/// Interval between two status polls (in milliseconds).
pub const POLL_INTERVAL_MS: u32 = 1000;

/// Number of characters shown in the Markdown preview.
pub const PREVIEW_CHAR_LIMIT: usize = 2000;

/// A warning banner is raised every time this many poll ticks fail in a row.
///
/// Polling itself never stops on transient errors.
pub const POLL_FAILURE_WARN_EVERY: u32 = 10;

/// Accepted file extension (case-sensitive).
pub const PDF_EXTENSION: &str = ".pdf";
