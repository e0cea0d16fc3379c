//! # Onetap - single-use code service
//!
//! Issues short random codes over HTTP and accepts each one back exactly
//! once. Codes live in process memory only.
//!
//! ## Endpoints
//! ```text
//! GET  /generate-code  → issue a code
//! POST /verify-code    → redeem {"code": "..."}
//! GET  /               → liveness
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod codes;
mod config;
mod error;
mod routes;
mod state;

use codes::store_watcher;
use config::AppConfig;
use state::AppState;

/// Onetap - single-use code service
#[derive(Parser, Debug)]
#[command(name = "onetap")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/onetap.toml")]
    config: String,

    /// Listen address (overrides config)
    #[arg(short, long, env = "LISTEN_ADDR")]
    listen: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "LOG_LEVEL")]
    log_level: String,

    /// Enable JSON logging output
    #[arg(long, default_value = "false")]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine
    dotenvy::dotenv().ok();

    let args = Args::parse();

    init_logging(&args.log_level, args.json_logs)?;

    info!("🔑 Starting Onetap v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load(&args.config, &args)?;
    info!("📋 Configuration loaded from {}", args.config);

    let (shutdown_tx, _) = tokio::sync::broadcast::channel::<()>(1);

    // The store lives for the whole process
    let state = AppState::new(config.clone());

    let watcher_store = state.store.clone();
    let watcher_shutdown = shutdown_tx.subscribe();
    let warn_threshold = config.store.warn_threshold;
    let watch_interval = Duration::from_secs(config.store.watch_interval_secs.max(1));
    tokio::spawn(async move {
        store_watcher(
            watcher_store,
            warn_threshold,
            watch_interval,
            watcher_shutdown,
        )
        .await;
    });

    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;
    info!("🚀 Onetap listening on {}", config.listen_addr);

    let shutdown_signal = async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        }
        info!("🛑 Shutdown signal received");
        let _ = shutdown_tx.send(());
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .context("Server error")?;

    info!("👋 Onetap shutdown complete");
    Ok(())
}

/// Initialize structured logging with tracing
fn init_logging(level: &str, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .try_init()
            .context("Failed to initialize logging")?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_thread_ids(true))
            .try_init()
            .context("Failed to initialize logging")?;
    }

    Ok(())
}
