//! Transaction entity and status lifecycle

use crate::{Merchant, MerchantId, PaymentMethod, PaymentMethodId, TransactionId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status of a transaction in its lifecycle
///
/// Only status is mutable after a transaction is created. The reconciliation
/// worker moves transactions between `Pending`/`Failed` and
/// `Completed`/`Failed`; every other state is reached through the explicit
/// status-update path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionStatus {
    /// Created, not yet submitted to the gateway
    Pending,
    /// Held by an external processing flow; never touched by reconciliation
    Processing,
    /// Gateway accepted the payment
    Completed,
    /// Gateway rejected the payment or the call errored
    Failed,
    /// Refunded after completion
    Refunded,
    /// Under dispute
    Disputed,
}

impl TransactionStatus {
    /// Check if this transaction is eligible for automatic retry
    pub fn is_unsettled(&self) -> bool {
        matches!(self, Self::Pending | Self::Failed)
    }

    /// Statuses the reconciliation worker retries
    pub const UNSETTLED: [TransactionStatus; 2] = [Self::Pending, Self::Failed];
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Completed => "Completed",
            Self::Failed => "Failed",
            Self::Refunded => "Refunded",
            Self::Disputed => "Disputed",
        };
        write!(f, "{s}")
    }
}

impl FromStr for TransactionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Processing" => Ok(Self::Processing),
            "Completed" => Ok(Self::Completed),
            "Failed" => Ok(Self::Failed),
            "Refunded" => Ok(Self::Refunded),
            "Disputed" => Ok(Self::Disputed),
            other => Err(format!("unknown transaction status: {other}")),
        }
    }
}

/// A monetary transaction belonging to a merchant
///
/// Both references must resolve to existing records, and the referenced
/// payment method must belong to the referenced merchant. All fields except
/// `status` (and the `modified_at` stamp) are immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub merchant_id: MerchantId,
    pub payment_method_id: PaymentMethodId,
    pub transaction_date: DateTime<Utc>,
    pub amount: Decimal,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction in `Pending` status
    pub fn new(
        merchant_id: MerchantId,
        payment_method_id: PaymentMethodId,
        amount: Decimal,
        transaction_date: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: TransactionId::new(),
            merchant_id,
            payment_method_id,
            transaction_date,
            amount,
            status: TransactionStatus::Pending,
            created_at: now,
            modified_at: now,
        }
    }
}

/// A transaction joined with its merchant and payment method
///
/// This is the shape returned by filtered store reads, mirroring the
/// eager-loaded repository reads of the service layer: callers get the
/// merchant name and the method label/detail blob without further lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDetail {
    pub transaction: Transaction,
    pub merchant: Merchant,
    pub payment_method: PaymentMethod,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsettled_statuses() {
        assert!(TransactionStatus::Pending.is_unsettled());
        assert!(TransactionStatus::Failed.is_unsettled());
        assert!(!TransactionStatus::Completed.is_unsettled());
        assert!(!TransactionStatus::Processing.is_unsettled());
        assert!(!TransactionStatus::Refunded.is_unsettled());
        assert!(!TransactionStatus::Disputed.is_unsettled());
    }

    #[test]
    fn status_round_trips_through_display() {
        for status in [
            TransactionStatus::Pending,
            TransactionStatus::Processing,
            TransactionStatus::Completed,
            TransactionStatus::Failed,
            TransactionStatus::Refunded,
            TransactionStatus::Disputed,
        ] {
            assert_eq!(status.to_string().parse::<TransactionStatus>(), Ok(status));
        }
        assert!("Settled".parse::<TransactionStatus>().is_err());
    }
}
