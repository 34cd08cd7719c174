//! Simulated payment gateway

use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

use crate::{GatewayResult, PaymentGateway, PaymentRequest, PaymentResponse};

/// Default processing latency of the simulated processor
pub const DEFAULT_LATENCY: Duration = Duration::from_secs(5);

/// Default approval percentage
pub const DEFAULT_SUCCESS_PERCENT: u8 = 90;

/// A stand-in payment processor
///
/// Sleeps for `latency`, then approves `success_percent`% of requests. The
/// simulation never fails outright; real gateway implementations surface
/// connectivity failures through [`crate::GatewayError`].
pub struct SimulatedGateway {
    latency: Duration,
    success_percent: u8,
}

impl SimulatedGateway {
    /// Create a gateway with the default latency and approval rate
    pub fn new() -> Self {
        Self {
            latency: DEFAULT_LATENCY,
            success_percent: DEFAULT_SUCCESS_PERCENT,
        }
    }

    /// Override the simulated latency
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Override the approval percentage (clamped to 100)
    pub fn with_success_percent(mut self, percent: u8) -> Self {
        self.success_percent = percent.min(100);
        self
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn process_payment(&self, request: PaymentRequest) -> GatewayResult<PaymentResponse> {
        tokio::time::sleep(self.latency).await;

        let payment_transaction_id = Uuid::new_v4();
        let successful = rand::thread_rng().gen_range(0..100) < self.success_percent;

        debug!(
            %payment_transaction_id,
            successful,
            details_len = request.payment_details.len(),
            "simulated gateway verdict"
        );

        Ok(PaymentResponse {
            success: successful,
            payment_transaction_id,
            message: if successful {
                "Payment processed successfully".to_string()
            } else {
                "Payment failed".to_string()
            },
        })
    }
}
