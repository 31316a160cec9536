//! HTTP surface
//!
//! A form page mirroring the interactive demo plus a small JSON API. Both call
//! the same `SpamDetector`.

pub mod handlers;
pub mod server;
pub mod web;

pub use handlers::{ApiResponse, AppState, ClassifyRequest, ClassifyResponse};
pub use server::ApiServer;
