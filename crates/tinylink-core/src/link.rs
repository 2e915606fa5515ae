use crate::shortcode::ShortCode;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A persisted mapping from a short code to its original URL.
///
/// Records are append-only: once a backend has assigned `id` and
/// `created_at`, no field ever changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortLink {
    /// Surrogate identifier assigned by the storage backend.
    pub id: u64,
    /// The original URL, exactly as it was submitted.
    pub original_url: String,
    /// The unique short code mapped to `original_url`.
    pub short_code: ShortCode,
    /// When the record was created.
    pub created_at: Timestamp,
}
