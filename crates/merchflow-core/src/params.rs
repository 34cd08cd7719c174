//! Operation parameter types

use chrono::{DateTime, Utc};
use merchflow_types::{MerchantId, PaymentMethodId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Input for creating a new transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessNewTransactionParams {
    pub merchant_id: MerchantId,
    pub payment_method_id: PaymentMethodId,
    pub amount: Decimal,
    /// Defaults to the current UTC time when absent
    pub transaction_date: Option<DateTime<Utc>>,
}

/// Input for registering a payment method with a merchant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterPaymentMethodParams {
    pub merchant_id: MerchantId,
    /// Instrument label, e.g. "Credit Card"
    pub method: String,
    /// Opaque detail blob handed to the gateway
    pub method_details: String,
}
