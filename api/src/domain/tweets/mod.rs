//! Tweet domain - models, queries and the storage collaborator

pub mod models;
pub mod queries;
pub mod store;

// Re-export models for convenience
pub use models::*;

pub use store::{MemoryTweetStore, PgTweetStore, StoreError, TweetStore};
