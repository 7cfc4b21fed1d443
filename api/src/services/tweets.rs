//! Tweet CRUD service
//!
//! Thin layer over a [`TweetStore`]: every operation is one store call whose
//! record is mapped back through [`Tweet::from_record`]. Lookups by id report
//! [`EntityNotFoundError`] both when the store finds nothing and when it
//! rejects the id as malformed. Other store failures pass through untouched.

use std::sync::Arc;

use crate::domain::tweets::{NewTweet, StoreError, TWEET_KIND, Tweet, TweetStore, UpdateTweet};
use crate::services::error::EntityNotFoundError;

#[derive(Debug, thiserror::Error)]
pub enum TweetsError {
    #[error(transparent)]
    NotFound(#[from] EntityNotFoundError),
    #[error(transparent)]
    Storage(#[from] StoreError),
}

#[derive(Clone)]
pub struct TweetsService {
    store: Arc<dyn TweetStore>,
}

impl TweetsService {
    pub fn new(store: Arc<dyn TweetStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, input: NewTweet) -> Result<Tweet, TweetsError> {
        let record = self.store.insert(input).await?;
        tracing::debug!(id = %record.id, created_at = %record.created_at, "tweet created");
        Ok(Tweet::from_record(record))
    }

    pub async fn find_all(&self) -> Result<Vec<Tweet>, TweetsError> {
        let records = self.store.find_all().await?;
        Ok(records.into_iter().map(Tweet::from_record).collect())
    }

    pub async fn find_one(&self, id: &str) -> Result<Tweet, TweetsError> {
        let record = self
            .store
            .find_by_id(id)
            .await
            .map_err(|e| convert_malformed_id(e, id))?
            .ok_or_else(|| not_found(id))?;
        Ok(Tweet::from_record(record))
    }

    /// Apply a partial update and return the tweet as stored afterwards
    pub async fn update(&self, id: &str, patch: UpdateTweet) -> Result<Tweet, TweetsError> {
        let record = self
            .store
            .find_and_update(id, patch)
            .await
            .map_err(|e| convert_malformed_id(e, id))?
            .ok_or_else(|| not_found(id))?;
        tracing::debug!(id, updated_at = %record.updated_at, "tweet updated");
        Ok(Tweet::from_record(record))
    }

    pub async fn remove(&self, id: &str) -> Result<(), TweetsError> {
        self.store
            .find_and_delete(id)
            .await
            .map_err(|e| convert_malformed_id(e, id))?
            .ok_or_else(|| not_found(id))?;
        tracing::debug!(id, "tweet removed");
        Ok(())
    }
}

fn not_found(id: &str) -> TweetsError {
    EntityNotFoundError::new(TWEET_KIND, id).into()
}

/// Malformed ids read as "not found"; anything else is propagated
fn convert_malformed_id(error: StoreError, id: &str) -> TweetsError {
    match error {
        StoreError::MalformedId(_) => not_found(id),
        other => TweetsError::Storage(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tweets::{MemoryTweetStore, TweetRecord};
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use uuid::Uuid;

    /// What every call on [`StubStore`] answers with
    #[derive(Clone)]
    enum Reply {
        Record(TweetRecord),
        Empty,
        MalformedId,
        Fail(&'static str),
    }

    /// Store double that answers every call the same way and counts calls
    struct StubStore {
        reply: Reply,
        calls: AtomicUsize,
        inserted: Mutex<Option<NewTweet>>,
        patched: Mutex<Option<(String, UpdateTweet)>>,
    }

    impl StubStore {
        fn new(reply: Reply) -> Arc<Self> {
            Arc::new(Self {
                reply,
                calls: AtomicUsize::new(0),
                inserted: Mutex::new(None),
                patched: Mutex::new(None),
            })
        }

        fn answer(&self, id: &str) -> Result<Option<TweetRecord>, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Reply::Record(r) => Ok(Some(r.clone())),
                Reply::Empty => Ok(None),
                Reply::MalformedId => Err(StoreError::MalformedId(id.to_string())),
                Reply::Fail(msg) => Err(StoreError::Backend((*msg).into())),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TweetStore for StubStore {
        async fn insert(&self, tweet: NewTweet) -> Result<TweetRecord, StoreError> {
            *self.inserted.lock().unwrap() = Some(tweet);
            self.answer("").map(|r| r.expect("stub insert needs a record"))
        }

        async fn find_all(&self) -> Result<Vec<TweetRecord>, StoreError> {
            self.answer("").map(|r| r.into_iter().collect())
        }

        async fn find_by_id(&self, id: &str) -> Result<Option<TweetRecord>, StoreError> {
            self.answer(id)
        }

        async fn find_and_update(
            &self,
            id: &str,
            patch: UpdateTweet,
        ) -> Result<Option<TweetRecord>, StoreError> {
            *self.patched.lock().unwrap() = Some((id.to_string(), patch));
            self.answer(id)
        }

        async fn find_and_delete(&self, id: &str) -> Result<Option<TweetRecord>, StoreError> {
            self.answer(id)
        }
    }

    fn record() -> TweetRecord {
        let now = Utc::now();
        TweetRecord {
            id: Uuid::new_v4(),
            content: "my content".to_string(),
            screen_name: "Luiz Carlos".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn hello() -> NewTweet {
        NewTweet {
            content: "Hello world".to_string(),
            screen_name: "test".to_string(),
        }
    }

    fn assert_not_found(result: Result<impl std::fmt::Debug, TweetsError>, id: &str) {
        match result {
            Err(TweetsError::NotFound(e)) => assert_eq!(e, EntityNotFoundError::new("Tweet", id)),
            other => panic!("expected not found for {id}, got {other:?}"),
        }
    }

    fn assert_backend_failure(result: Result<impl std::fmt::Debug, TweetsError>) {
        match result {
            Err(TweetsError::Storage(StoreError::Backend(e))) => {
                assert_eq!(e.to_string(), "fake error")
            }
            other => panic!("expected backend failure, got {other:?}"),
        }
    }

    // ---- error translation ----

    #[test]
    fn test_convert_malformed_id_to_not_found() {
        let err = convert_malformed_id(StoreError::MalformedId("123".to_string()), "123");
        assert!(matches!(err, TweetsError::NotFound(e) if e.id == "123" && e.kind == "Tweet"));
    }

    #[test]
    fn test_convert_leaves_other_errors_alone() {
        let err = convert_malformed_id(StoreError::Backend("boom".into()), "123");
        assert!(matches!(err, TweetsError::Storage(StoreError::Backend(_))));
    }

    // ---- against a stub store ----

    #[tokio::test]
    async fn test_create_maps_stored_record() {
        let stored = record();
        let store = StubStore::new(Reply::Record(stored.clone()));
        let service = TweetsService::new(store.clone());
        let input = NewTweet {
            content: stored.content.clone(),
            screen_name: stored.screen_name.clone(),
        };

        let tweet = service.create(input.clone()).await.unwrap();

        assert_eq!(store.inserted.lock().unwrap().as_ref(), Some(&input));
        assert_eq!(store.calls(), 1);
        assert_eq!(tweet, Tweet::from_record(stored));
    }

    #[tokio::test]
    async fn test_find_all_maps_every_record() {
        let stored = record();
        let store = StubStore::new(Reply::Record(stored.clone()));
        let service = TweetsService::new(store.clone());

        let tweets = service.find_all().await.unwrap();

        assert_eq!(tweets, vec![Tweet::from_record(stored)]);
        assert_eq!(store.calls(), 1);
    }

    #[tokio::test]
    async fn test_find_one_by_id() {
        let stored = record();
        let id = stored.id.to_string();
        let service = TweetsService::new(StubStore::new(Reply::Record(stored.clone())));

        let tweet = service.find_one(&id).await.unwrap();

        assert_eq!(tweet, Tweet::from_record(stored));
    }

    #[tokio::test]
    async fn test_find_one_not_found_paths() {
        let service = TweetsService::new(StubStore::new(Reply::Empty));
        assert_not_found(service.find_one("123").await, "123");

        let service = TweetsService::new(StubStore::new(Reply::MalformedId));
        assert_not_found(service.find_one("123").await, "123");
    }

    #[tokio::test]
    async fn test_find_one_propagates_generic_error() {
        let service = TweetsService::new(StubStore::new(Reply::Fail("fake error")));
        assert_backend_failure(service.find_one("123").await);
    }

    #[tokio::test]
    async fn test_update_passes_patch_and_maps_result() {
        let stored = record();
        let id = stored.id.to_string();
        let store = StubStore::new(Reply::Record(stored.clone()));
        let service = TweetsService::new(store.clone());
        let patch = UpdateTweet {
            content: Some("my content".to_string()),
            screen_name: Some("Luiz Carlos".to_string()),
        };

        let tweet = service.update(&id, patch.clone()).await.unwrap();

        assert_eq!(store.patched.lock().unwrap().clone(), Some((id, patch)));
        assert_eq!(tweet, Tweet::from_record(stored));
    }

    #[tokio::test]
    async fn test_update_not_found_paths() {
        let service = TweetsService::new(StubStore::new(Reply::Empty));
        assert_not_found(service.update("123", UpdateTweet::default()).await, "123");

        let service = TweetsService::new(StubStore::new(Reply::MalformedId));
        assert_not_found(service.update("123", UpdateTweet::default()).await, "123");
    }

    #[tokio::test]
    async fn test_update_propagates_generic_error() {
        let service = TweetsService::new(StubStore::new(Reply::Fail("fake error")));
        assert_backend_failure(service.update("123", UpdateTweet::default()).await);
    }

    #[tokio::test]
    async fn test_remove_returns_unit() {
        let stored = record();
        let id = stored.id.to_string();
        let store = StubStore::new(Reply::Record(stored));
        let service = TweetsService::new(store.clone());

        service.remove(&id).await.unwrap();

        assert_eq!(store.calls(), 1);
    }

    #[tokio::test]
    async fn test_remove_not_found_paths() {
        let service = TweetsService::new(StubStore::new(Reply::Empty));
        assert_not_found(service.remove("123").await, "123");

        let service = TweetsService::new(StubStore::new(Reply::MalformedId));
        assert_not_found(service.remove("123").await, "123");
    }

    #[tokio::test]
    async fn test_remove_propagates_generic_error() {
        let service = TweetsService::new(StubStore::new(Reply::Fail("fake error")));
        assert_backend_failure(service.remove("123").await);
    }

    // ---- against the in-memory store ----

    fn memory_service() -> TweetsService {
        TweetsService::new(Arc::new(MemoryTweetStore::new()))
    }

    #[tokio::test]
    async fn test_create_then_find_one() {
        let service = memory_service();

        let tweet = service.create(hello()).await.unwrap();

        assert!(!tweet.id.is_empty());
        assert_eq!(tweet, Tweet::new(hello(), tweet.id.clone()));
        assert_eq!(service.find_one(&tweet.id).await.unwrap(), tweet);
    }

    #[tokio::test]
    async fn test_find_all_after_create() {
        let service = memory_service();

        let tweet = service.create(hello()).await.unwrap();

        assert_eq!(service.find_all().await.unwrap(), vec![tweet]);
    }

    #[tokio::test]
    async fn test_lookups_on_unknown_ids() {
        let service = memory_service();
        let fresh = Uuid::new_v4().to_string();

        assert_not_found(service.find_one(&fresh).await, &fresh);
        assert_not_found(service.find_one("123").await, "123");
        assert_not_found(service.update(&fresh, UpdateTweet::default()).await, &fresh);
        assert_not_found(service.update("123", UpdateTweet::default()).await, "123");
        assert_not_found(service.remove(&fresh).await, &fresh);
        assert_not_found(service.remove("123").await, "123");
    }

    #[tokio::test]
    async fn test_urn_spelling_of_stored_id_is_not_found() {
        let service = memory_service();
        let tweet = service.create(hello()).await.unwrap();
        let urn = format!("urn:uuid:{}", tweet.id);

        assert_not_found(service.find_one(&urn).await, &urn);
        assert_not_found(service.remove(&urn).await, &urn);
        assert_eq!(service.find_one(&tweet.id).await.unwrap(), tweet);
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_field() {
        let service = memory_service();
        let tweet = service.create(hello()).await.unwrap();

        let updated = service
            .update(
                &tweet.id,
                UpdateTweet {
                    content: Some("new".to_string()),
                    screen_name: None,
                },
            )
            .await
            .unwrap();

        let expected = Tweet {
            id: tweet.id.clone(),
            content: "new".to_string(),
            screen_name: "test".to_string(),
        };
        assert_eq!(updated, expected);
        assert_eq!(service.find_one(&tweet.id).await.unwrap(), expected);
    }

    #[tokio::test]
    async fn test_full_update() {
        let service = memory_service();
        let tweet = service.create(hello()).await.unwrap();

        let updated = service
            .update(
                &tweet.id,
                UpdateTweet {
                    content: Some("Hello world updated".to_string()),
                    screen_name: Some("test1".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(
            updated,
            Tweet::new(
                NewTweet {
                    content: "Hello world updated".to_string(),
                    screen_name: "test1".to_string(),
                },
                tweet.id,
            )
        );
    }

    #[tokio::test]
    async fn test_remove_then_find_one() {
        let service = memory_service();
        let tweet = service.create(hello()).await.unwrap();

        service.remove(&tweet.id).await.unwrap();

        assert_not_found(service.find_one(&tweet.id).await, &tweet.id);
        assert!(service.find_all().await.unwrap().is_empty());
    }
}
