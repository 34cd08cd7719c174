//! Service-level error taxonomy
//!
//! Domain errors (not-found) propagate unmodified to the boundary so it can
//! map them to a specific response. Infrastructure errors are absorbed at
//! their origin: cache failures never reach this type, and gateway failures
//! are handled per-transaction inside the reconciliation worker.

use merchflow_store::StoreError;
use std::fmt;
use thiserror::Error;

/// The kind of entity a lookup failed to resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Merchant,
    PaymentMethod,
    Transaction,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Merchant => "Merchant",
            Self::PaymentMethod => "PaymentMethod",
            Self::Transaction => "Transaction",
        };
        write!(f, "{s}")
    }
}

/// Service operation errors
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The requested entity does not exist
    #[error("{kind} with id {id} was not found")]
    NotFound { kind: ResourceKind, id: String },

    /// Store backend failure
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl ServiceError {
    /// Create a not-found error for an entity kind and id
    pub fn not_found(kind: ResourceKind, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// Check whether this error is a not-found condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use merchflow_types::MerchantId;

    #[test]
    fn not_found_message_names_kind_and_id() {
        let id = MerchantId::new();
        let err = ServiceError::not_found(ResourceKind::Merchant, id);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), format!("Merchant with id {id} was not found"));
    }
}
