//! SQL for the `tweets` table
//!
//! Each function takes any Postgres executor, so the store can run them on
//! the pool today and inside a transaction later. Updates and deletes use
//! `RETURNING` and yield `None` when no row has the id.

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use super::super::models::{NewTweet, TweetRecord, UpdateTweet};

/// Insert a tweet under a caller-generated id and return the stored row
pub async fn insert_tweet<'e, E>(
    executor: E,
    id: Uuid,
    tweet: &NewTweet,
) -> Result<TweetRecord, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        r#"
        INSERT INTO tweets (id, content, screen_name)
        VALUES ($1, $2, $3)
        RETURNING id, content, screen_name, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(&tweet.content)
    .bind(&tweet.screen_name)
    .fetch_one(executor)
    .await
}

/// List every tweet in insertion order
pub async fn list_tweets<'e, E>(executor: E) -> Result<Vec<TweetRecord>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        r#"
        SELECT id, content, screen_name, created_at, updated_at
        FROM tweets
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .fetch_all(executor)
    .await
}

/// Get a tweet by ID
pub async fn get_tweet<'e, E>(executor: E, id: Uuid) -> Result<Option<TweetRecord>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        r#"
        SELECT id, content, screen_name, created_at, updated_at
        FROM tweets
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}

/// Apply a partial update and return the row as it is after the update.
/// NULL parameters keep the current column value.
pub async fn update_tweet<'e, E>(
    executor: E,
    id: Uuid,
    patch: &UpdateTweet,
) -> Result<Option<TweetRecord>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        r#"
        UPDATE tweets
        SET content = COALESCE($2, content),
            screen_name = COALESCE($3, screen_name),
            updated_at = clock_timestamp()
        WHERE id = $1
        RETURNING id, content, screen_name, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(patch.content.as_deref())
    .bind(patch.screen_name.as_deref())
    .fetch_optional(executor)
    .await
}

/// Delete a tweet, returning the removed row if there was one
pub async fn delete_tweet<'e, E>(
    executor: E,
    id: Uuid,
) -> Result<Option<TweetRecord>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        r#"
        DELETE FROM tweets
        WHERE id = $1
        RETURNING id, content, screen_name, created_at, updated_at
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}
