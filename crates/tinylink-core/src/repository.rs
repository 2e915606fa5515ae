use crate::error::Result;
use crate::link::ShortLink;
use crate::shortcode::ShortCode;
use async_trait::async_trait;

/// A read-only view of a repository.
///
/// This trait provides only the read operations from [`Repository`],
/// so lookups can be served from a handle that cannot write.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves the link stored under `code`.
    /// Returns `None` if the code does not exist.
    async fn get(&self, code: &ShortCode) -> Result<Option<ShortLink>>;

    /// Checks whether a short code already exists in the repository.
    async fn exists(&self, code: &ShortCode) -> Result<bool>;
}

#[async_trait]
pub trait Repository: ReadRepository {
    /// Inserts a new link and returns the stored record, with `id` and
    /// `created_at` assigned by the backend.
    ///
    /// Returns `Err(StorageError::Conflict)` if the code already exists.
    async fn insert(&self, code: &ShortCode, original_url: &str) -> Result<ShortLink>;
}
