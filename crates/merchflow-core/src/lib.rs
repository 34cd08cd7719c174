//! Merchflow Core - service layer over the store, cache, and report engine
//!
//! # Architecture
//!
//! ```text
//! MerchantService ──────┬── CacheService (cache-aside reads, report cache)
//!     │                 └── Store
//! TransactionService ───┬── Store
//!     │                 └── MerchantService (referential checks)
//!     └── unsettled_card_payments() - the reconciliation worker's query
//! ```
//!
//! Read paths pull through the cache before touching the store; the daily
//! report is the cached artifact produced by [`report::build`]. Domain
//! errors ([`ServiceError::NotFound`]) propagate to the boundary unmodified;
//! infrastructure errors are absorbed where they occur.

pub mod error;
pub mod keys;
pub mod merchants;
pub mod params;
pub mod report;
pub mod transactions;

pub use error::{ResourceKind, ServiceError, ServiceResult};
pub use merchants::MerchantService;
pub use params::{ProcessNewTransactionParams, RegisterPaymentMethodParams};
pub use transactions::{TransactionService, RETRYABLE_METHODS};
