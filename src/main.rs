//! Media Cache - Graph API media mirror
//!
//! Serves social-media posts from memory, keeping them in sync with the
//! Graph API and keeping the access token renewed on a schedule.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use media_cache::api::{create_router, AppState};
use media_cache::cache::MediaCache;
use media_cache::config::Config;
use media_cache::graph::{GraphApi, GraphClient};
use media_cache::persistence::{connect_durable, CredentialStore, DiskStore};
use media_cache::tasks::{MediaSync, Scheduler, SchedulerHandle, TokenRefresher};
use media_cache::token::TokenRuntime;

/// Main entry point for the media cache service.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Build the Graph API client and open the credential stores
/// 4. Bootstrap the access token (fatal on failure)
/// 5. Start the media sync and token refresh scheduler
/// 6. Serve HTTP until SIGINT/SIGTERM, then stop the scheduler
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "media_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting media cache service");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, sync_every={}m, refresh_every={}d, backend={:?}",
        config.server_port,
        config.media_sync_minutes,
        config.token_refresh_days,
        config.token_backend
    );

    let graph: Arc<dyn GraphApi> =
        Arc::new(GraphClient::from_config(&config).context("building Graph API client")?);
    let disk: Arc<dyn CredentialStore> = Arc::new(DiskStore::new(&config.token_path));
    let durable = connect_durable(&config)
        .await
        .context("connecting durable credential backend")?;

    // Bootstrap
    let runtime = Arc::new(TokenRuntime::new());
    media_cache::init_token(&runtime, disk.as_ref(), durable.as_ref(), graph.as_ref())
        .await
        .context("bootstrapping access token")?;

    // Background jobs
    let cache = MediaCache::new();
    let sync = Arc::new(MediaSync::new(graph.clone(), runtime.clone(), cache.clone()));
    let refresher = Arc::new(TokenRefresher::new(runtime, graph, disk, durable));
    let scheduler = Scheduler::new(
        sync.clone(),
        config.media_sync_period(),
        refresher,
        config.token_refresh_period(),
    )
    .start(CancellationToken::new());
    info!("Scheduler started");

    let app = create_router(AppState::new(cache, sync), &config.allowed_origins);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(scheduler))
        .await
        .context("serving HTTP")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then stops the scheduler.
///
/// Jobs already running are left to finish on their own.
async fn shutdown_signal(scheduler: SchedulerHandle) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    scheduler.cancel();
    scheduler.stopped().await;
    info!("Scheduler stopped");
}
