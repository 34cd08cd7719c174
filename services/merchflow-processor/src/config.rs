//! Processor Configuration
//!
//! Configuration management for the Merchflow processor.
//! Supports environment variables, config files, and CLI arguments.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Processor configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// Cache layer configuration
    #[serde(default)]
    pub cache: CacheSettings,

    /// Reconciliation worker configuration
    #[serde(default)]
    pub worker: WorkerSettings,

    /// Simulated gateway configuration
    #[serde(default)]
    pub gateway: GatewaySettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which cache backend to run with
///
/// Chosen once at startup and fixed for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackendKind {
    #[default]
    Memory,
    Redis,
}

impl FromStr for CacheBackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "memory" => Ok(Self::Memory),
            "redis" => Ok(Self::Redis),
            other => Err(format!("unknown cache backend: {other}")),
        }
    }
}

/// Cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Backend selection (memory, redis)
    #[serde(default)]
    pub backend: CacheBackendKind,

    /// Redis connection URL (redis backend only)
    #[serde(default = "default_redis_url")]
    pub redis_url: String,

    /// Default TTL applied when callers do not specify one
    #[serde(default = "default_cache_ttl")]
    pub default_ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            backend: CacheBackendKind::Memory,
            redis_url: default_redis_url(),
            default_ttl_secs: default_cache_ttl(),
        }
    }
}

impl CacheSettings {
    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_secs)
    }
}

/// Reconciliation worker settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerSettings {
    /// Seconds between sweeps
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

impl Default for WorkerSettings {
    fn default() -> Self {
        Self {
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}

impl WorkerSettings {
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

/// Simulated gateway settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewaySettings {
    /// Simulated processing latency in milliseconds
    #[serde(default = "default_gateway_latency")]
    pub latency_ms: u64,

    /// Approval percentage (0-100)
    #[serde(default = "default_success_percent")]
    pub success_percent: u8,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            latency_ms: default_gateway_latency(),
            success_percent: default_success_percent(),
        }
    }
}

impl GatewaySettings {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json, pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_cache_ttl() -> u64 {
    5 * 60
}

fn default_sweep_interval() -> u64 {
    60
}

fn default_gateway_latency() -> u64 {
    5_000
}

fn default_success_percent() -> u8 {
    90
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

// =============================================================================
// Configuration Loading
// =============================================================================

impl ProcessorConfig {
    /// Load configuration from environment and optional config file
    pub fn load(config_path: Option<&str>) -> anyhow::Result<Self> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let mut builder = config::Config::builder();

        // Add config file if specified
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        // Add default config locations
        builder = builder
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false));

        // Add environment variables with MERCHFLOW_ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("MERCHFLOW")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;

        let processor_config: ProcessorConfig = config.try_deserialize().unwrap_or_else(|_| {
            tracing::warn!("Using default configuration - some settings may need adjustment");
            ProcessorConfig::default()
        });

        Ok(processor_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_contract() {
        let config = ProcessorConfig::default();
        assert_eq!(config.cache.backend, CacheBackendKind::Memory);
        assert_eq!(config.cache.default_ttl(), Duration::from_secs(300));
        assert_eq!(config.worker.sweep_interval(), Duration::from_secs(60));
        assert_eq!(config.gateway.latency(), Duration::from_millis(5_000));
        assert_eq!(config.gateway.success_percent, 90);
    }

    #[test]
    fn backend_kind_parses_from_cli_strings() {
        assert_eq!("memory".parse(), Ok(CacheBackendKind::Memory));
        assert_eq!("redis".parse(), Ok(CacheBackendKind::Redis));
        assert!("memcached".parse::<CacheBackendKind>().is_err());
    }
}
