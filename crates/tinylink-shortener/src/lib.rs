//! Short-code allocation service.
//!
//! [`ShortenerService`] implements the [`Shortener`] trait from
//! `tinylink_core` on top of any [`Repository`](tinylink_core::Repository)
//! and [`Generator`](tinylink_generator::Generator).

pub mod service;

pub use service::{ShortenerService, ShortenerSettings, DEFAULT_MAX_ATTEMPTS};
pub use tinylink_core::{Shortener, ShortenerError};
