//! Tweet CRUD endpoints (/tweets/*)

mod dto;

pub use dto::TweetResponse;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};
use std::sync::Arc;

use crate::AppState;
use super::error::ApiError;
use dto::{CreateTweetRequest, UpdateTweetRequest};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tweets", get(list_tweets).post(create_tweet))
        .route(
            "/tweets/{id}",
            get(get_tweet).patch(update_tweet).delete(remove_tweet),
        )
}

/// POST /tweets - Create a tweet
async fn create_tweet(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateTweetRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TweetResponse>), ApiError> {
    let Json(req) = payload?;
    let input = req.validate().map_err(ApiError::Validation)?;

    let tweet = state.tweets.create(input).await?;

    Ok((StatusCode::CREATED, Json(tweet.into())))
}

/// GET /tweets - List every tweet
async fn list_tweets(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TweetResponse>>, ApiError> {
    let tweets = state.tweets.find_all().await?;
    Ok(Json(tweets.into_iter().map(TweetResponse::from).collect()))
}

/// GET /tweets/:id - Fetch one tweet
async fn get_tweet(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<TweetResponse>, ApiError> {
    let tweet = state.tweets.find_one(&id).await?;
    Ok(Json(tweet.into()))
}

/// PATCH /tweets/:id - Overwrite the supplied fields, return the updated tweet
async fn update_tweet(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTweetRequest>, JsonRejection>,
) -> Result<Json<TweetResponse>, ApiError> {
    let Json(req) = payload?;
    let patch = req.validate().map_err(ApiError::Validation)?;

    let tweet = state.tweets.update(&id, patch).await?;

    Ok(Json(tweet.into()))
}

/// DELETE /tweets/:id - Delete a tweet
async fn remove_tweet(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.tweets.remove(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
