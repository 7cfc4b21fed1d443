//! Tweet domain models

mod tweet;

pub use tweet::{NewTweet, TWEET_KIND, Tweet, TweetRecord, UpdateTweet};
