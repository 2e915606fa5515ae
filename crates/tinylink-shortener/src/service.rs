use async_trait::async_trait;
use std::num::NonZeroU32;
use std::sync::Arc;
use tinylink_core::{Repository, ShortCode, ShortLink, Shortener, ShortenerError, StorageError};
use tinylink_generator::Generator;
use tracing::{debug, error, trace, warn};
use typed_builder::TypedBuilder;

/// Number of candidates tried before giving up on an allocation.
pub const DEFAULT_MAX_ATTEMPTS: NonZeroU32 = match NonZeroU32::new(10) {
    Some(n) => n,
    None => unreachable!(),
};

/// Tunables for [`ShortenerService`].
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct ShortenerSettings {
    /// Upper bound on generated candidates per `create` call.
    #[builder(default = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: NonZeroU32,
}

impl Default for ShortenerSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A concrete implementation of the `Shortener` trait.
///
/// This service wraps a `Repository` and a `Generator`. Each `create` call
/// draws candidates from the generator until one is free, checking each
/// against the repository first. A conflict reported by the insert itself
/// (another request claimed the code between the check and the write) is
/// treated the same as a failed check. Storage errors are never retried.
#[derive(Debug)]
pub struct ShortenerService<R, G> {
    repository: Arc<R>,
    generator: Arc<G>,
    settings: ShortenerSettings,
}

impl<R, G> Clone for ShortenerService<R, G> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            generator: Arc::clone(&self.generator),
            settings: self.settings,
        }
    }
}

impl<R: Repository, G: Generator> ShortenerService<R, G> {
    /// Creates a new `ShortenerService` with default settings.
    pub fn new(repository: R, generator: G) -> Self {
        Self::with_settings(repository, generator, ShortenerSettings::default())
    }

    pub fn with_settings(repository: R, generator: G, settings: ShortenerSettings) -> Self {
        Self {
            repository: Arc::new(repository),
            generator: Arc::new(generator),
            settings,
        }
    }

    async fn allocate(&self, original_url: &str) -> Result<ShortLink, ShortenerError> {
        let max_attempts = self.settings.max_attempts.get();

        for attempt in 1..=max_attempts {
            let code: ShortCode = self.generator.generate().into();

            if self.repository.exists(&code).await? {
                debug!(code = %code, attempt, max_attempts, "short code collision");
                continue;
            }

            match self.repository.insert(&code, original_url).await {
                Ok(link) => {
                    debug!(code = %link.short_code, id = link.id, attempt, "allocated short code");
                    return Ok(link);
                }
                Err(StorageError::Conflict(_)) => {
                    warn!(code = %code, attempt, max_attempts, "short code claimed concurrently");
                }
                Err(e) => return Err(e.into()),
            }
        }

        error!(max_attempts, "short code allocation exhausted");
        Err(ShortenerError::AllocationExhausted {
            attempts: max_attempts,
        })
    }
}

#[async_trait]
impl<R: Repository, G: Generator> Shortener for ShortenerService<R, G> {
    async fn create(&self, original_url: &str) -> Result<ShortLink, ShortenerError> {
        self.allocate(original_url).await
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, ShortenerError> {
        // Nothing outside the code alphabet was ever stored.
        let Ok(code) = ShortCode::new(code) else {
            trace!(code, "malformed short code");
            return Ok(None);
        };

        let link = self.repository.get(&code).await?;
        trace!(code = %code, found = link.is_some(), "looked up short code");
        Ok(link)
    }
}
