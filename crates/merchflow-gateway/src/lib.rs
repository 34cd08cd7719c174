//! Merchflow Gateway - external payment gateway contract
//!
//! The gateway accepts an opaque payment-detail blob and either returns a
//! success/failure response after some latency, or fails outright
//! (connectivity, timeout). Callers must treat an outright failure the same
//! as an unsuccessful response; the reconciliation worker does exactly that.
//!
//! [`SimulatedGateway`] stands in for the real processor: it sleeps for a
//! configurable latency and approves a configurable percentage of requests.

pub mod error;
pub mod simulated;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use error::{GatewayError, GatewayResult};
pub use simulated::SimulatedGateway;

/// A payment submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Opaque, merchant- and payment-method-specific detail blob
    pub payment_details: String,
}

/// The gateway's verdict on a payment submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentResponse {
    pub success: bool,
    /// The gateway's own id for the attempt
    pub payment_transaction_id: Uuid,
    pub message: String,
}

/// External payment processor contract
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Submit a payment and await the gateway's verdict
    async fn process_payment(&self, request: PaymentRequest) -> GatewayResult<PaymentResponse>;
}
