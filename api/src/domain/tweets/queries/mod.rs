//! Postgres queries for the tweet domain

pub mod tweets;
