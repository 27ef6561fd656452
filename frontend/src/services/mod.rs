//! Backend services.
//!
//! # Services
//!
//! - [`api`] - upload, status polling, download and health endpoints
//!   of the conversion service

pub mod api;

pub use api::*;
