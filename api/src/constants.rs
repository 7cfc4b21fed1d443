//! Application constants

/// Port used when neither `--port` nor `PORT` is given
pub const DEFAULT_PORT: u16 = 3000;

pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default Postgres pool size
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Maximum accepted request body (64 KB); tweets are small JSON documents
pub const MAX_BODY_SIZE: usize = 64 * 1024;

/// Log filter applied when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info,tweets_api=debug,tower_http=debug";
