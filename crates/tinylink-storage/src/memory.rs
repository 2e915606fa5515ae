use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use jiff::Timestamp;
use std::sync::atomic::{AtomicU64, Ordering};
use tinylink_core::repository::{ReadRepository, Repository};
use tinylink_core::{ShortCode, ShortLink, StorageError};

type Result<T> = std::result::Result<T, StorageError>;

/// In-memory implementation of the Repository trait using DashMap.
///
/// Inserts go through the map's entry API, so the uniqueness check and the
/// write happen under the same shard lock and two concurrent inserts of the
/// same code cannot both succeed.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    storage: DashMap<String, ShortLink>,
    last_id: AtomicU64,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored links.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn get(&self, code: &ShortCode) -> Result<Option<ShortLink>> {
        Ok(self.storage.get(code.as_str()).map(|entry| entry.value().clone()))
    }

    async fn exists(&self, code: &ShortCode) -> Result<bool> {
        Ok(self.storage.contains_key(code.as_str()))
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert(&self, code: &ShortCode, original_url: &str) -> Result<ShortLink> {
        match self.storage.entry(code.as_str().to_owned()) {
            Entry::Occupied(_) => Err(StorageError::Conflict(code.to_string())),
            Entry::Vacant(slot) => {
                let link = ShortLink {
                    id: self.last_id.fetch_add(1, Ordering::SeqCst) + 1,
                    original_url: original_url.to_owned(),
                    short_code: code.clone(),
                    created_at: Timestamp::now(),
                };
                slot.insert(link.clone());
                Ok(link)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn code(s: &str) -> ShortCode {
        ShortCode::new_unchecked(s)
    }

    #[tokio::test]
    async fn insert_and_get() {
        let repo = InMemoryRepository::new();

        let inserted = repo
            .insert(&code("abc123"), "https://example.com")
            .await
            .unwrap();

        let result = repo.get(&code("abc123")).await.unwrap().unwrap();
        assert_eq!(result, inserted);
        assert_eq!(result.original_url, "https://example.com");
        assert_eq!(result.short_code.as_str(), "abc123");
    }

    #[tokio::test]
    async fn assigns_increasing_ids() {
        let repo = InMemoryRepository::new();

        let first = repo.insert(&code("aaaaaa"), "https://a.example").await.unwrap();
        let second = repo.insert(&code("bbbbbb"), "https://b.example").await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(second.created_at >= first.created_at);
    }

    #[tokio::test]
    async fn get_nonexistent() {
        let repo = InMemoryRepository::new();

        let result = repo.get(&code("nope")).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn lookup_is_case_sensitive() {
        let repo = InMemoryRepository::new();
        repo.insert(&code("AbCdEf"), "https://example.com")
            .await
            .unwrap();

        assert!(repo.get(&code("abcdef")).await.unwrap().is_none());
        assert!(!repo.exists(&code("ABCDEF")).await.unwrap());
        assert!(repo.exists(&code("AbCdEf")).await.unwrap());
    }

    #[tokio::test]
    async fn insert_conflict_keeps_original_record() {
        let repo = InMemoryRepository::new();

        repo.insert(&code("abc123"), "https://example.com")
            .await
            .unwrap();

        let err = repo
            .insert(&code("abc123"), "https://other.com")
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::Conflict(_)));
        let stored = repo.get(&code("abc123")).await.unwrap().unwrap();
        assert_eq!(stored.original_url, "https://example.com");
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn exists_checks() {
        let repo = InMemoryRepository::new();

        assert!(!repo.exists(&code("abc123")).await.unwrap());

        repo.insert(&code("abc123"), "https://example.com")
            .await
            .unwrap();

        assert!(repo.exists(&code("abc123")).await.unwrap());
    }

    #[tokio::test]
    async fn concurrent_inserts_of_same_code_admit_one_winner() {
        let repo = Arc::new(InMemoryRepository::new());
        let mut handles = vec![];

        for i in 0..16u64 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.insert(&code("same00"), &format!("https://example{}.com", i))
                    .await
            }));
        }

        let mut wins = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => wins += 1,
                Err(err) => assert!(matches!(err, StorageError::Conflict(_))),
            }
        }

        assert_eq!(wins, 1);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn concurrent_access() {
        let repo = Arc::new(InMemoryRepository::new());
        let mut handles = vec![];

        for i in 0..10u64 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                let c = ShortCode::new_unchecked(format!("code{:03}", i));
                repo.insert(&c, &format!("https://example{}.com", i))
                    .await
                    .unwrap();
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }

        for i in 0..10u64 {
            let c = ShortCode::new_unchecked(format!("code{:03}", i));
            let result = repo.get(&c).await.unwrap().unwrap();
            assert_eq!(result.original_url, format!("https://example{}.com", i));
        }
    }
}
