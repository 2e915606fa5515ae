//! HTTP boundary for the tinylink shortener.
//!
//! Validates incoming requests, hands them to a
//! [`Shortener`](tinylink_core::Shortener) and maps results and errors onto
//! HTTP responses.

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;
pub mod telemetry;

pub use app::App;
pub use state::AppState;
