//! Merchflow Worker - background reconciliation of unsettled transactions
//!
//! A scheduled loop that finds transactions stuck in `Pending` or `Failed`
//! on card-based instruments, drives each through the payment gateway, and
//! writes the outcome back. One execution of the find-and-retry cycle is a
//! *sweep*.
//!
//! # Semantics
//!
//! - Gateway calls within a sweep are sequential; a transaction's status is
//!   persisted before the next transaction is submitted.
//! - Per-transaction failures are isolated: a gateway error marks that
//!   transaction `Failed` and the sweep continues.
//! - There is no persistent cursor and no idempotency key: every sweep
//!   rescans the filtered set, so a transaction that keeps failing is
//!   resubmitted on every sweep until it leaves the unsettled states.
//!   Delivery to the gateway is at-least-once, not exactly-once.
//! - Cancellation is observed while waiting for the next tick and between
//!   transactions within a sweep; a status write is never abandoned
//!   mid-flight.

use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use merchflow_core::TransactionService;
use merchflow_gateway::{PaymentGateway, PaymentRequest};
use merchflow_types::{TransactionDetail, TransactionStatus};

/// Default pause between sweeps
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Outcome of a single sweep
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepOutcome {
    /// Transactions submitted to the gateway
    pub processed: usize,
    pub completed: usize,
    pub failed: usize,
}

/// The background reconciliation loop
pub struct ReconciliationWorker {
    transactions: TransactionService,
    gateway: Arc<dyn PaymentGateway>,
    interval: Duration,
}

impl ReconciliationWorker {
    pub fn new(transactions: TransactionService, gateway: Arc<dyn PaymentGateway>) -> Self {
        Self {
            transactions,
            gateway,
            interval: DEFAULT_SWEEP_INTERVAL,
        }
    }

    /// Override the pause between sweeps
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Run sweeps until the token is cancelled
    ///
    /// Sweeps first, then waits, so a freshly started process drains the
    /// backlog immediately.
    pub async fn run(self, token: CancellationToken) {
        info!(interval_secs = self.interval.as_secs(), "reconciliation worker started");
        loop {
            self.sweep(&token).await;
            tokio::select! {
                _ = token.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }
        info!("reconciliation worker stopped");
    }

    /// One find-and-retry cycle over the unsettled card transactions
    pub async fn sweep(&self, token: &CancellationToken) -> SweepOutcome {
        let mut outcome = SweepOutcome::default();

        let eligible = match self.transactions.unsettled_card_payments().await {
            Ok(eligible) => eligible,
            Err(e) => {
                error!(error = %e, "failed to query unsettled transactions, skipping sweep");
                return outcome;
            }
        };
        if eligible.is_empty() {
            return outcome;
        }

        info!(eligible = eligible.len(), "reconciliation sweep started");
        for detail in eligible {
            if token.is_cancelled() {
                warn!("cancellation requested, abandoning sweep");
                break;
            }
            match self.process_one(detail).await {
                Some(TransactionStatus::Completed) => {
                    outcome.processed += 1;
                    outcome.completed += 1;
                }
                Some(_) => {
                    outcome.processed += 1;
                    outcome.failed += 1;
                }
                None => {}
            }
        }
        info!(
            processed = outcome.processed,
            completed = outcome.completed,
            failed = outcome.failed,
            "reconciliation sweep finished"
        );
        outcome
    }

    /// Submit one transaction to the gateway and persist the outcome
    ///
    /// Returns the status written back, or `None` if the write itself
    /// failed. An error from the gateway is treated the same as an
    /// unsuccessful response.
    async fn process_one(&self, detail: TransactionDetail) -> Option<TransactionStatus> {
        let id = detail.transaction.id;
        let request = PaymentRequest {
            payment_details: detail.payment_method.method_details.clone(),
        };

        let status = match self.gateway.process_payment(request).await {
            Ok(response) if response.success => TransactionStatus::Completed,
            Ok(response) => {
                warn!(transaction_id = %id, message = %response.message, "gateway declined payment");
                TransactionStatus::Failed
            }
            Err(e) => {
                warn!(transaction_id = %id, error = %e, "gateway call failed");
                TransactionStatus::Failed
            }
        };

        match self.transactions.update_status(id, status).await {
            Ok(_) => Some(status),
            Err(e) => {
                error!(transaction_id = %id, error = %e, "failed to persist reconciliation outcome");
                None
            }
        }
    }
}
