//! Gateway error types

use thiserror::Error;

/// Gateway call failures (connectivity, timeout)
///
/// Callers must treat these identically to an unsuccessful
/// [`crate::PaymentResponse`].
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Gateway unavailable: {0}")]
    Unavailable(String),

    #[error("Gateway timed out after {seconds}s")]
    Timeout { seconds: u64 },
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;
