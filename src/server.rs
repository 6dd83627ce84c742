//! HTTP server initialization and runtime setup.
//!
//! Builds the in-memory store and rate limiter, spawns the idle client
//! sweeper, and runs the Axum server until a shutdown signal arrives.

use crate::application::services::ShortenerService;
use crate::config::Config;
use crate::domain::RateLimiter;
use crate::infrastructure::persistence::InMemoryUrlRepository;
use crate::infrastructure::rate_limit::InMemoryRateLimiter;
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::id_codec::IdCodec;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - In-memory url repository and rate limiter
/// - Background sweeper for idle rate limit windows
/// - Axum HTTP server with graceful shutdown
///
/// State lives for the duration of this call and is discarded on return.
///
/// # Errors
///
/// Returns an error if:
/// - Listen address is invalid
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let repository = Arc::new(InMemoryUrlRepository::new());
    let rate_limiter = Arc::new(InMemoryRateLimiter::new(config.rate_limit_policy()));

    let shortener = ShortenerService::new(
        repository,
        Arc::clone(&rate_limiter),
        IdCodec::new(config.min_code_length),
        config.short_url_domain.clone(),
    )
    .with_max_code_length(config.max_code_length);

    let sweeper = spawn_sweeper(rate_limiter, config.sweep_interval);

    let state = AppState::new(Arc::new(shortener), config.behind_proxy);
    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    if let Some(sweeper) = sweeper {
        sweeper.abort();
    }
    tracing::info!("Server stopped");

    Ok(())
}

/// Periodically drops rate limit state of clients that went idle.
///
/// Returns `None` when the interval is zero.
pub fn spawn_sweeper(
    rate_limiter: Arc<InMemoryRateLimiter>,
    interval: Duration,
) -> Option<JoinHandle<()>> {
    if interval.is_zero() {
        return None;
    }

    let handle = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let purged = rate_limiter.purge_idle();
            if purged > 0 {
                tracing::debug!(
                    purged,
                    remaining = rate_limiter.tracked_clients(),
                    "Purged idle rate limit windows"
                );
            }
        }
    });

    tracing::info!("Idle client sweeper started");
    Some(handle)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
