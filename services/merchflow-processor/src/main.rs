//! Merchflow Processor
//!
//! Owning process for the merchant transaction processing core. Wires the
//! cache-aside layer (backend fixed at startup), the in-memory store, the
//! service layer, and the reconciliation worker, then runs until a shutdown
//! signal arrives.
//!
//! # Usage
//!
//! ```bash
//! # Start with the in-process cache
//! merchflow-processor
//!
//! # Start against a shared Redis cache
//! merchflow-processor --cache-backend redis --redis-url redis://localhost:6379
//!
//! # Start with environment overrides
//! MERCHFLOW__WORKER__SWEEP_INTERVAL_SECS=30 merchflow-processor
//! ```

mod config;

use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use merchflow_cache::{CacheBackend, CacheService, MemoryCache, RedisCache};
use merchflow_core::{MerchantService, TransactionService};
use merchflow_gateway::SimulatedGateway;
use merchflow_store::MemoryStore;
use merchflow_worker::ReconciliationWorker;

use crate::config::{CacheBackendKind, LoggingConfig, ProcessorConfig};

// =============================================================================
// CLI Arguments
// =============================================================================

/// Merchflow Processor - merchant transaction processing core
#[derive(Parser, Debug)]
#[command(name = "merchflow-processor")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (TOML)
    #[arg(short, long, env = "MERCHFLOW_CONFIG")]
    config: Option<String>,

    /// Cache backend (memory, redis)
    #[arg(long, env = "MERCHFLOW_CACHE_BACKEND")]
    cache_backend: Option<String>,

    /// Redis connection URL
    #[arg(long, env = "REDIS_URL")]
    redis_url: Option<String>,

    /// Seconds between reconciliation sweeps
    #[arg(long, env = "MERCHFLOW_SWEEP_INTERVAL")]
    sweep_interval: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "MERCHFLOW_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Log format (json, pretty)
    #[arg(long, env = "MERCHFLOW_LOG_FORMAT", default_value = "pretty")]
    log_format: String,
}

// =============================================================================
// Main Entry Point
// =============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut processor_config = ProcessorConfig::load(args.config.as_deref())?;

    // Override with CLI arguments
    if let Some(backend) = args.cache_backend {
        processor_config.cache.backend = backend.parse().map_err(anyhow::Error::msg)?;
    }
    if let Some(redis_url) = args.redis_url {
        processor_config.cache.redis_url = redis_url;
    }
    if let Some(sweep_interval) = args.sweep_interval {
        processor_config.worker.sweep_interval_secs = sweep_interval;
    }
    processor_config.logging.level = args.log_level;
    processor_config.logging.format = args.log_format;

    init_logging(&processor_config.logging)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting Merchflow Processor"
    );

    // The cache backend is fixed for the process lifetime
    let backend: Arc<dyn CacheBackend> = match processor_config.cache.backend {
        CacheBackendKind::Memory => {
            tracing::info!("Using in-process cache backend");
            Arc::new(MemoryCache::new())
        }
        CacheBackendKind::Redis => {
            Arc::new(RedisCache::connect(&processor_config.cache.redis_url).await?)
        }
    };
    let cache = CacheService::with_default_ttl(backend, processor_config.cache.default_ttl());

    let store = Arc::new(MemoryStore::new());
    let merchants = MerchantService::new(store.clone(), cache);
    let transactions = TransactionService::new(store, merchants);

    let gateway = Arc::new(
        SimulatedGateway::new()
            .with_latency(processor_config.gateway.latency())
            .with_success_percent(processor_config.gateway.success_percent),
    );

    let worker = ReconciliationWorker::new(transactions, gateway)
        .with_interval(processor_config.worker.sweep_interval());

    let token = CancellationToken::new();
    let worker_task = tokio::spawn(worker.run(token.clone()));

    shutdown_signal().await;
    tracing::info!("Shutdown signal received");

    token.cancel();
    worker_task.await?;

    tracing::info!("Processor shutdown complete");

    Ok(())
}

// =============================================================================
// Initialization Functions
// =============================================================================

/// Initialize tracing/logging
fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let subscriber = tracing_subscriber::registry().with(env_filter);

    match config.format.as_str() {
        "json" => {
            subscriber.with(fmt::layer().json().with_target(true)).init();
        }
        _ => {
            subscriber
                .with(fmt::layer().pretty().with_target(true))
                .init();
        }
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
