use async_trait::async_trait;
use jiff::Timestamp;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use tinylink_core::repository::{ReadRepository, Repository};
use tinylink_core::{ShortCode, ShortLink, StorageError};
use tracing::debug;

type Result<T> = std::result::Result<T, StorageError>;

/// DDL for the `short_links` table.
///
/// `short_code` uses a binary collation so lookups and the unique index are
/// case-sensitive.
pub const SCHEMA: &str = include_str!("../ddl/mysql/short_links.sql");

/// MySQL implementation of the repository contract.
///
/// Rows are append-only. `created_at` is stored as Unix milliseconds and
/// `id` comes from the table's auto-increment column.
#[derive(Debug, Clone)]
pub struct MySqlRepository {
    pool: MySqlPool,
}

impl MySqlRepository {
    /// Creates a repository from an existing MySQL connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Creates a repository by opening a new MySQL connection pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = MySqlPool::connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }
}

fn parse_created_at(millis: i64) -> Result<Timestamp> {
    Timestamp::from_millisecond(millis).map_err(|e| {
        StorageError::InvalidData(format!("invalid created_at timestamp '{}': {e}", millis))
    })
}

fn row_to_link(row: &MySqlRow) -> Result<ShortLink> {
    let id: u64 = row.try_get("id").map_err(map_sqlx_error)?;
    let original_url: String = row.try_get("original_url").map_err(map_sqlx_error)?;
    let short_code: String = row.try_get("short_code").map_err(map_sqlx_error)?;
    let created_at: i64 = row.try_get("created_at").map_err(map_sqlx_error)?;

    Ok(ShortLink {
        id,
        original_url,
        short_code: ShortCode::new_unchecked(short_code),
        created_at: parse_created_at(created_at)?,
    })
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

#[async_trait]
impl ReadRepository for MySqlRepository {
    async fn get(&self, code: &ShortCode) -> Result<Option<ShortLink>> {
        let row = sqlx::query(
            r#"
            SELECT id, original_url, short_code, created_at
            FROM short_links
            WHERE short_code = ?
            LIMIT 1
            "#,
        )
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(row_to_link).transpose()
    }

    async fn exists(&self, code: &ShortCode) -> Result<bool> {
        let exists = sqlx::query(
            r#"
            SELECT 1
            FROM short_links
            WHERE short_code = ?
            LIMIT 1
            "#,
        )
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .is_some();

        Ok(exists)
    }
}

#[async_trait]
impl Repository for MySqlRepository {
    async fn insert(&self, code: &ShortCode, original_url: &str) -> Result<ShortLink> {
        let created_at = Timestamp::now();

        let result = sqlx::query(
            r#"
            INSERT INTO short_links (short_code, original_url, created_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(code.as_str())
        .bind(original_url)
        .bind(created_at.as_millisecond())
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => Ok(ShortLink {
                id: done.last_insert_id(),
                original_url: original_url.to_owned(),
                short_code: code.clone(),
                // Round-trip through milliseconds so the returned record
                // matches what a later read produces.
                created_at: parse_created_at(created_at.as_millisecond())?,
            }),
            Err(err) if is_unique_violation(&err) => {
                debug!(code = %code, "unique index rejected short code");
                Err(StorageError::Conflict(code.to_string()))
            }
            Err(err) => Err(map_sqlx_error(err)),
        }
    }
}
