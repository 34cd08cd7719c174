//! Merchant entity
//!
//! The merchant is the aggregate root for reporting purposes: payment methods
//! and transactions reference it, but both are independently addressable.

use crate::MerchantId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A merchant whose transactions are processed by the platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Merchant {
    pub id: MerchantId,
    /// Display name shown in reports and used for substring filtering
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl Merchant {
    /// Create a new merchant with a fresh ID, stamped at the current time
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: MerchantId::new(),
            name: name.into(),
            created_at: now,
            modified_at: now,
        }
    }
}
