mod app;
mod cache;
mod config;
mod fetcher;
mod handlers;
mod remote;
mod state;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use listenfd::ListenFd;
use tokio::{net::TcpListener, signal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use timelines_client::GoodreadsClient;
use timelines_core::cache::CacheMaintenance;
use timelines_core::remote::ReadingApi;

use crate::{
    app::create_app,
    cache::{flush_snapshot, spawn_flush_on_shutdown, spawn_sweeper, MemoryCache},
    config::Config,
    remote::InMemoryReadingApi,
    state::AppState,
};

/// Serves a calendar of everything a Goodreads user has read.
#[derive(Parser, Debug)]
#[command(name = "timelines")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Address to bind
    #[arg(long, short = 'H', default_value = "0.0.0.0", env = "HOST")]
    host: String,

    /// TCP port
    #[arg(long, short, default_value = "8080", env = "PORT")]
    port: u16,

    /// Serve generated demo data instead of calling the Goodreads API
    #[arg(long, env = "DEMO")]
    demo: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = Config::from_env();
    let api = reading_api(&cli, &config);
    let snapshot_path = config.cache_snapshot_path.clone();

    let cache = Arc::new(MemoryCache::new(config.cache_ttl()));
    match cache.load_snapshot(&snapshot_path).await {
        Ok(count) => {
            tracing::info!(path = %snapshot_path.display(), count, "Loaded cache snapshot")
        }
        Err(err) => {
            tracing::warn!(path = %snapshot_path.display(), error = %err, "Starting with an empty cache")
        }
    }

    let state = AppState::new(config.clone(), api, cache.clone());
    let sweeper = spawn_sweeper(
        cache.clone(),
        config.cache_sweep_interval(),
        state.subscribe_shutdown(),
    );
    let flush = spawn_flush_on_shutdown(
        cache.clone(),
        snapshot_path.clone(),
        state.subscribe_shutdown(),
    );

    let listener = bind_listener(&cli).await?;
    tracing::info!(addr = %listener.local_addr()?, "Serving reading timelines");

    axum::serve(listener, create_app(state.clone()))
        .with_graceful_shutdown(shutdown_signal(state))
        .await?;

    if let Err(err) = sweeper.await {
        tracing::warn!(error = %err, "Cache sweeper ended abnormally");
    }
    if let Err(err) = flush.await {
        tracing::warn!(error = %err, "Shutdown snapshot task ended abnormally");
    }

    // Pick up pages fetched by requests that finished during the drain.
    flush_snapshot(cache.as_ref(), &snapshot_path).await;

    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "timelines=debug,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Reuses a socket handed over by listenfd (systemfd, cargo-watch), or binds
/// `host:port`.
async fn bind_listener(cli: &Cli) -> Result<TcpListener> {
    if let Some(inherited) = ListenFd::from_env().take_tcp_listener(0)? {
        inherited.set_nonblocking(true)?;
        return Ok(TcpListener::from_std(inherited)?);
    }

    Ok(TcpListener::bind((cli.host.as_str(), cli.port)).await?)
}

/// Picks the data source: seeded demo data or the real API.
fn reading_api(cli: &Cli, config: &Config) -> Arc<dyn ReadingApi> {
    if cli.demo {
        tracing::info!("Serving demo data");
        return Arc::new(InMemoryReadingApi::with_demo_data());
    }

    if config.goodreads_key.is_empty() {
        tracing::warn!("No Goodreads key configured (GOODREADS_KEY or goodreads.key)");
    }

    tracing::info!(api_url = %config.goodreads_api_url, "Using Goodreads API");
    Arc::new(GoodreadsClient::new(
        &config.goodreads_api_url,
        &config.goodreads_key,
    ))
}

/// Resolves on Ctrl+C or SIGTERM, then tells background tasks to stop.
async fn shutdown_signal(state: AppState) {
    let interrupt = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "Cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let received = tokio::select! {
        _ = interrupt => "SIGINT",
        _ = terminate => "SIGTERM",
    };

    tracing::info!(signal = received, "Shutting down");
    state.signal_shutdown();
}
