//! Storage collaborator for tweets
//!
//! [`TweetStore`] is the seam between the service and whatever holds the
//! documents. Ids are UUID strings; a string that does not parse as one is
//! reported as [`StoreError::MalformedId`], which is distinct from a
//! well-formed id that matches nothing (`Ok(None)`).
//!
//! Two implementations live here: [`PgTweetStore`] over a Postgres pool and
//! [`MemoryTweetStore`] for tests and throwaway local runs.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::models::{NewTweet, TweetRecord, UpdateTweet};
use super::queries::tweets as queries;

/// Failures the storage collaborator can report
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The id is not a valid identifier for this store
    #[error("malformed identifier: {0:?}")]
    MalformedId(String),
    /// Anything else the backend raised
    #[error("storage backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Backend(Box::new(e))
    }
}

/// Length of the hyphenated UUID form, the only one the store hands out
const HYPHENATED_LEN: usize = 36;

/// Parse a caller-supplied id into the store's identifier format.
///
/// Only the hyphenated form is accepted. `Uuid::parse_str` also takes the
/// simple, braced and `urn:uuid:` spellings, which would give one tweet
/// several addresses.
pub fn parse_id(id: &str) -> Result<Uuid, StoreError> {
    if id.len() != HYPHENATED_LEN {
        return Err(StoreError::MalformedId(id.to_string()));
    }
    Uuid::parse_str(id).map_err(|_| StoreError::MalformedId(id.to_string()))
}

/// Document collection of tweets keyed by string id
#[async_trait]
pub trait TweetStore: Send + Sync {
    /// Persist a new tweet; the store assigns the id
    async fn insert(&self, tweet: NewTweet) -> Result<TweetRecord, StoreError>;

    /// Every stored tweet, oldest first
    async fn find_all(&self) -> Result<Vec<TweetRecord>, StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<TweetRecord>, StoreError>;

    /// Atomically apply `patch` and return the record after the update
    async fn find_and_update(
        &self,
        id: &str,
        patch: UpdateTweet,
    ) -> Result<Option<TweetRecord>, StoreError>;

    /// Atomically delete and return the removed record
    async fn find_and_delete(&self, id: &str) -> Result<Option<TweetRecord>, StoreError>;
}

/// Postgres-backed store
#[derive(Debug, Clone)]
pub struct PgTweetStore {
    pool: PgPool,
}

impl PgTweetStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TweetStore for PgTweetStore {
    async fn insert(&self, tweet: NewTweet) -> Result<TweetRecord, StoreError> {
        Ok(queries::insert_tweet(&self.pool, Uuid::new_v4(), &tweet).await?)
    }

    async fn find_all(&self) -> Result<Vec<TweetRecord>, StoreError> {
        Ok(queries::list_tweets(&self.pool).await?)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<TweetRecord>, StoreError> {
        let id = parse_id(id)?;
        Ok(queries::get_tweet(&self.pool, id).await?)
    }

    async fn find_and_update(
        &self,
        id: &str,
        patch: UpdateTweet,
    ) -> Result<Option<TweetRecord>, StoreError> {
        let id = parse_id(id)?;
        Ok(queries::update_tweet(&self.pool, id, &patch).await?)
    }

    async fn find_and_delete(&self, id: &str) -> Result<Option<TweetRecord>, StoreError> {
        let id = parse_id(id)?;
        Ok(queries::delete_tweet(&self.pool, id).await?)
    }
}

/// In-process store. Records are kept in insertion order.
#[derive(Debug, Default)]
pub struct MemoryTweetStore {
    records: RwLock<Vec<TweetRecord>>,
}

impl MemoryTweetStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TweetStore for MemoryTweetStore {
    async fn insert(&self, tweet: NewTweet) -> Result<TweetRecord, StoreError> {
        let now = Utc::now();
        let record = TweetRecord {
            id: Uuid::new_v4(),
            content: tweet.content,
            screen_name: tweet.screen_name,
            created_at: now,
            updated_at: now,
        };
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn find_all(&self) -> Result<Vec<TweetRecord>, StoreError> {
        Ok(self.records.read().await.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<TweetRecord>, StoreError> {
        let id = parse_id(id)?;
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn find_and_update(
        &self,
        id: &str,
        patch: UpdateTweet,
    ) -> Result<Option<TweetRecord>, StoreError> {
        let id = parse_id(id)?;
        let mut records = self.records.write().await;
        let Some(record) = records.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        patch.apply_to(record);
        record.updated_at = Utc::now();
        Ok(Some(record.clone()))
    }

    async fn find_and_delete(&self, id: &str) -> Result<Option<TweetRecord>, StoreError> {
        let id = parse_id(id)?;
        let mut records = self.records.write().await;
        let Some(index) = records.iter().position(|r| r.id == id) else {
            return Ok(None);
        };
        Ok(Some(records.remove(index)))
    }
}
