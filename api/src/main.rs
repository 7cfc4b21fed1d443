mod config;
mod constants;
mod domain;
mod logging;
mod routes;
mod services;

use anyhow::Context;
use clap::Parser;
use std::sync::Arc;

use config::{Config, StoreBackend};
use domain::tweets::{MemoryTweetStore, PgTweetStore, TweetStore};
use services::tweets::TweetsService;

#[derive(Clone)]
pub struct AppState {
    pub tweets: TweetsService,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    logging::init(config.log_format);

    let store: Arc<dyn TweetStore> = match config.store {
        StoreBackend::Postgres => {
            let database_url = config.database_url()?;
            let pool = services::db::connect(database_url, config.max_connections)
                .await
                .context("Failed to set up database")?;
            Arc::new(PgTweetStore::new(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("using in-memory store, tweets are lost on shutdown");
            Arc::new(MemoryTweetStore::new())
        }
    };

    let state = Arc::new(AppState {
        tweets: TweetsService::new(store),
    });
    let app = routes::build_app(state, &config.cors_origins);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    tracing::info!(%addr, store = ?config.store, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server failed")?;

    tracing::info!("shut down");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received, draining connections");
}
