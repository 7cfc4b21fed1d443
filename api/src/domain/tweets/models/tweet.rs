//! Tweet model definitions

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Entity kind reported in not-found errors
pub const TWEET_KIND: &str = "Tweet";

/// A tweet as handed back to callers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tweet {
    pub id: String,
    pub content: String,
    pub screen_name: String,
}

/// Tweet fields supplied on creation (the store assigns the id)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTweet {
    pub content: String,
    pub screen_name: String,
}

/// Partial update - `None` leaves the stored value untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTweet {
    pub content: Option<String>,
    pub screen_name: Option<String>,
}

/// A tweet row as the store holds it, storage metadata included
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct TweetRecord {
    pub id: Uuid,
    pub content: String,
    pub screen_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tweet {
    pub fn new(props: NewTweet, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: props.content,
            screen_name: props.screen_name,
        }
    }

    /// Rebuild a tweet from a stored record.
    ///
    /// Only `id`, `content` and `screen_name` are carried over; timestamps
    /// and any other storage metadata are dropped. No validation happens
    /// here since records were validated when written.
    pub fn from_record(record: TweetRecord) -> Self {
        Self::new(
            NewTweet {
                content: record.content,
                screen_name: record.screen_name,
            },
            record.id.to_string(),
        )
    }
}

impl From<TweetRecord> for Tweet {
    fn from(record: TweetRecord) -> Self {
        Self::from_record(record)
    }
}

impl UpdateTweet {
    /// Overwrite the supplied fields on `record`
    pub fn apply_to(&self, record: &mut TweetRecord) {
        if let Some(content) = &self.content {
            record.content.clone_from(content);
        }
        if let Some(screen_name) = &self.screen_name {
            record.screen_name.clone_from(screen_name);
        }
    }
}
