//! Request and response bodies for /tweets

use serde::{Deserialize, Serialize};

use crate::domain::tweets::{NewTweet, Tweet, UpdateTweet};

/// Tweet API response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TweetResponse {
    pub id: String,
    pub content: String,
    pub screen_name: String,
}

impl From<Tweet> for TweetResponse {
    fn from(t: Tweet) -> Self {
        Self {
            id: t.id,
            content: t.content,
            screen_name: t.screen_name,
        }
    }
}

/// POST /tweets body. Missing fields deserialize as empty and fail validation.
#[derive(Debug, Deserialize)]
pub struct CreateTweetRequest {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub screen_name: String,
}

impl CreateTweetRequest {
    pub fn validate(self) -> Result<NewTweet, Vec<String>> {
        let mut errors = Vec::new();
        require_non_empty("content", &self.content, &mut errors);
        require_non_empty("screen_name", &self.screen_name, &mut errors);

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(NewTweet {
            content: self.content,
            screen_name: self.screen_name,
        })
    }
}

/// PATCH /tweets/{id} body - every field optional, but non-empty when given
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTweetRequest {
    pub content: Option<String>,
    pub screen_name: Option<String>,
}

impl UpdateTweetRequest {
    pub fn validate(self) -> Result<UpdateTweet, Vec<String>> {
        let mut errors = Vec::new();
        if let Some(content) = &self.content {
            require_non_empty("content", content, &mut errors);
        }
        if let Some(screen_name) = &self.screen_name {
            require_non_empty("screen_name", screen_name, &mut errors);
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(UpdateTweet {
            content: self.content,
            screen_name: self.screen_name,
        })
    }
}

fn require_non_empty(field: &str, value: &str, errors: &mut Vec<String>) {
    if value.is_empty() {
        errors.push(format!("{field} should not be empty"));
    }
}
