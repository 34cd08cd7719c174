//! Merchflow Store - abstract query surface over the entity collections
//!
//! The store is an external collaborator from the core's point of view: a
//! queryable collection of merchants, payment methods, and transactions with
//! filtered reads and single-record upserts. This crate defines the [`Store`]
//! trait consumed by the service layer and worker, plus the in-memory
//! implementation used by tests and the demo process.
//!
//! Transaction reads return [`TransactionDetail`] - the transaction joined
//! with its merchant and payment method - so callers never need follow-up
//! lookups for the merchant name or the instrument label/detail blob.
//!
//! Result ordering is unspecified; callers that need a stable order must
//! sort explicitly.

pub mod error;
pub mod memory;

use async_trait::async_trait;

use merchflow_types::{
    Merchant, MerchantId, PaymentMethod, PaymentMethodId, Transaction, TransactionDetail,
    TransactionId, TransactionPredicate,
};

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;

/// Queryable entity collections with single-record upserts
#[async_trait]
pub trait Store: Send + Sync {
    /// All merchants
    async fn list_merchants(&self) -> StoreResult<Vec<Merchant>>;

    /// Merchant by id
    async fn merchant(&self, id: MerchantId) -> StoreResult<Option<Merchant>>;

    /// Insert or replace a merchant
    async fn upsert_merchant(&self, merchant: Merchant) -> StoreResult<()>;

    /// Payment methods belonging to a merchant
    async fn payment_methods_for(&self, merchant_id: MerchantId)
        -> StoreResult<Vec<PaymentMethod>>;

    /// Payment method by id
    async fn payment_method(&self, id: PaymentMethodId) -> StoreResult<Option<PaymentMethod>>;

    /// Insert or replace a payment method
    async fn upsert_payment_method(&self, method: PaymentMethod) -> StoreResult<()>;

    /// Transactions matching every predicate (empty slice = all), joined with
    /// their merchant and payment method
    async fn filter_transactions(
        &self,
        predicates: &[TransactionPredicate],
    ) -> StoreResult<Vec<TransactionDetail>>;

    /// Transaction by id, joined with its merchant and payment method
    async fn transaction(&self, id: TransactionId) -> StoreResult<Option<TransactionDetail>>;

    /// Insert or replace a transaction
    async fn upsert_transaction(&self, transaction: Transaction) -> StoreResult<()>;
}
