//! In-memory store
//!
//! Entity maps behind async read-write locks. Suitable for tests and the
//! demo process; a database-backed implementation would live behind the same
//! trait.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::warn;

use merchflow_types::{
    Merchant, MerchantId, PaymentMethod, PaymentMethodId, Transaction, TransactionDetail,
    TransactionId, TransactionPredicate,
};

use crate::{Store, StoreResult};

/// In-memory entity collections
#[derive(Default)]
pub struct MemoryStore {
    merchants: RwLock<HashMap<MerchantId, Merchant>>,
    payment_methods: RwLock<HashMap<PaymentMethodId, PaymentMethod>>,
    transactions: RwLock<HashMap<TransactionId, Transaction>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Join a transaction with its merchant and payment method
    ///
    /// Returns `None` (with a warning) when a reference does not resolve;
    /// a dangling reference is a data defect, not a query failure.
    fn join(
        transaction: &Transaction,
        merchants: &HashMap<MerchantId, Merchant>,
        payment_methods: &HashMap<PaymentMethodId, PaymentMethod>,
    ) -> Option<TransactionDetail> {
        let merchant = match merchants.get(&transaction.merchant_id) {
            Some(merchant) => merchant.clone(),
            None => {
                warn!(
                    transaction_id = %transaction.id,
                    merchant_id = %transaction.merchant_id,
                    "transaction references a missing merchant, skipping"
                );
                return None;
            }
        };
        let payment_method = match payment_methods.get(&transaction.payment_method_id) {
            Some(method) => method.clone(),
            None => {
                warn!(
                    transaction_id = %transaction.id,
                    payment_method_id = %transaction.payment_method_id,
                    "transaction references a missing payment method, skipping"
                );
                return None;
            }
        };
        Some(TransactionDetail {
            transaction: transaction.clone(),
            merchant,
            payment_method,
        })
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_merchants(&self) -> StoreResult<Vec<Merchant>> {
        Ok(self.merchants.read().await.values().cloned().collect())
    }

    async fn merchant(&self, id: MerchantId) -> StoreResult<Option<Merchant>> {
        Ok(self.merchants.read().await.get(&id).cloned())
    }

    async fn upsert_merchant(&self, merchant: Merchant) -> StoreResult<()> {
        self.merchants.write().await.insert(merchant.id, merchant);
        Ok(())
    }

    async fn payment_methods_for(
        &self,
        merchant_id: MerchantId,
    ) -> StoreResult<Vec<PaymentMethod>> {
        Ok(self
            .payment_methods
            .read()
            .await
            .values()
            .filter(|method| method.merchant_id == merchant_id)
            .cloned()
            .collect())
    }

    async fn payment_method(&self, id: PaymentMethodId) -> StoreResult<Option<PaymentMethod>> {
        Ok(self.payment_methods.read().await.get(&id).cloned())
    }

    async fn upsert_payment_method(&self, method: PaymentMethod) -> StoreResult<()> {
        self.payment_methods.write().await.insert(method.id, method);
        Ok(())
    }

    async fn filter_transactions(
        &self,
        predicates: &[TransactionPredicate],
    ) -> StoreResult<Vec<TransactionDetail>> {
        let merchants = self.merchants.read().await;
        let payment_methods = self.payment_methods.read().await;
        let transactions = self.transactions.read().await;

        Ok(transactions
            .values()
            .filter_map(|tx| Self::join(tx, &merchants, &payment_methods))
            .filter(|detail| predicates.iter().all(|p| p.matches(detail)))
            .collect())
    }

    async fn transaction(&self, id: TransactionId) -> StoreResult<Option<TransactionDetail>> {
        let merchants = self.merchants.read().await;
        let payment_methods = self.payment_methods.read().await;
        let transactions = self.transactions.read().await;

        Ok(transactions
            .get(&id)
            .and_then(|tx| Self::join(tx, &merchants, &payment_methods)))
    }

    async fn upsert_transaction(&self, transaction: Transaction) -> StoreResult<()> {
        self.transactions
            .write()
            .await
            .insert(transaction.id, transaction);
        Ok(())
    }
}
