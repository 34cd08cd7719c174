//! Merchflow Types - Canonical domain types for merchant transaction processing
//!
//! This crate contains the foundational types for Merchflow with zero
//! dependencies on other merchflow crates. It defines:
//!
//! - Identity types (MerchantId, PaymentMethodId, TransactionId)
//! - Merchant, payment method, and transaction entities
//! - The transaction status lifecycle
//! - Daily merchant report shapes
//! - The transaction filter and its predicate vocabulary
//!
//! # Domain Invariants
//!
//! 1. A payment method always belongs to exactly one merchant
//! 2. A transaction's merchant and payment-method references must resolve,
//!    and the referenced method must belong to the referenced merchant
//! 3. Transaction status is the only mutable field after creation

pub mod filter;
pub mod identity;
pub mod merchant;
pub mod payment_method;
pub mod report;
pub mod transaction;

pub use filter::*;
pub use identity::*;
pub use merchant::*;
pub use payment_method::*;
pub use report::*;
pub use transaction::*;

/// Version of the Merchflow types schema
pub const TYPES_VERSION: &str = "0.1.0";
