use crate::error::ShortenerError;
use crate::link::ShortLink;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, ShortenerError>;

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Allocates a fresh short code for `original_url` and persists the link.
    ///
    /// The URL must already be validated by the caller.
    async fn create(&self, original_url: &str) -> Result<ShortLink>;

    /// Looks up a link by its exact short code.
    /// Returns `None` if no link has that code.
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>>;
}
