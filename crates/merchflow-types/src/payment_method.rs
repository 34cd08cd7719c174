//! Payment method entity

use crate::{MerchantId, PaymentMethodId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A payment instrument registered by a merchant
///
/// The `method` field is the human-readable instrument label (for example
/// "Credit Card"). Grouping and the reconciliation eligibility rule operate
/// on this label, not on the method's identity: two distinct "Credit Card"
/// instruments aggregate together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: PaymentMethodId,
    /// Owning merchant; a method always belongs to exactly one merchant
    pub merchant_id: MerchantId,
    /// Instrument label, e.g. "Credit Card", "Debit Card", "Cash"
    pub method: String,
    /// Opaque detail blob handed to the payment gateway as-is
    pub method_details: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl PaymentMethod {
    /// Create a new payment method bound to a merchant
    pub fn new(
        merchant_id: MerchantId,
        method: impl Into<String>,
        method_details: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: PaymentMethodId::new(),
            merchant_id,
            method: method.into(),
            method_details: method_details.into(),
            created_at: now,
            modified_at: now,
        }
    }
}
