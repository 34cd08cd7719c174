//! Daily merchant report shapes
//!
//! Reports are derived, non-persistent artifacts keyed by
//! (merchant id, report date). They are regenerated deterministically from
//! the merchant's transactions for that day and cached with a bounded TTL.

use crate::MerchantId;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-merchant, per-day statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MerchantReport {
    pub merchant_id: MerchantId,
    /// UTC calendar date the report covers
    pub report_date: NaiveDate,
    /// Absent when the day window contains no transactions
    pub summary: Option<ReportSummary>,
    /// Grouped by instrument label, sorted by label
    pub by_payment_method: Vec<PaymentMethodStats>,
    /// Grouped by UTC hour-of-day, sorted by hour
    pub by_hour: Vec<HourlyStats>,
}

/// Whole-window totals; only produced for a non-empty window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_transactions: u64,
    pub total_amount: Decimal,
    /// Count of transactions whose status is not `Failed`
    pub successful_transactions: u64,
    pub failed_transactions: u64,
    pub average_transaction_amount: Decimal,
}

/// Count and amount sum for one instrument label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethodStats {
    pub method: String,
    pub count: u64,
    pub total_amount: Decimal,
}

/// Count and amount sum for one UTC hour of the day (0-23)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyStats {
    pub hour: u32,
    pub count: u64,
    pub total_amount: Decimal,
}
