//! Core types and traits for the tinylink URL shortener.
//!
//! This crate provides the shared domain model used by the storage
//! backends, the allocation service and the HTTP gateway.

pub mod error;
pub mod link;
pub mod repository;
pub mod shortcode;
pub mod shortener;

pub use error::{CoreError, ShortenerError, StorageError};
pub use link::ShortLink;
pub use repository::{ReadRepository, Repository};
pub use shortcode::ShortCode;
pub use shortener::Shortener;
