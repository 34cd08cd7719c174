//! Transaction service

use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use merchflow_store::Store;
use merchflow_types::{
    Transaction, TransactionDetail, TransactionFilter, TransactionId, TransactionPredicate,
    TransactionStatus,
};

use crate::error::{ResourceKind, ServiceError, ServiceResult};
use crate::merchants::MerchantService;
use crate::params::ProcessNewTransactionParams;

/// Instrument labels eligible for automatic retry by the reconciliation
/// worker; the business rule restricts retries to card-based instruments
pub const RETRYABLE_METHODS: [&str; 2] = ["Credit Card", "Debit Card"];

/// Transaction creation, status updates, and filtered reads
#[derive(Clone)]
pub struct TransactionService {
    store: Arc<dyn Store>,
    merchants: MerchantService,
}

impl TransactionService {
    pub fn new(store: Arc<dyn Store>, merchants: MerchantService) -> Self {
        Self { store, merchants }
    }

    /// Create a new `Pending` transaction
    ///
    /// The merchant must exist and the payment method must belong to it; a
    /// method registered to a different merchant reads as not found.
    pub async fn process_new_transaction(
        &self,
        params: ProcessNewTransactionParams,
    ) -> ServiceResult<Transaction> {
        let merchant = self.merchants.merchant_or_err(params.merchant_id).await?;
        let method = self
            .store
            .payment_method(params.payment_method_id)
            .await?
            .filter(|method| method.merchant_id == merchant.id)
            .ok_or_else(|| {
                ServiceError::not_found(ResourceKind::PaymentMethod, params.payment_method_id)
            })?;

        let transaction = Transaction::new(
            merchant.id,
            method.id,
            params.amount,
            params.transaction_date.unwrap_or_else(Utc::now),
        );
        self.store.upsert_transaction(transaction.clone()).await?;
        info!(
            transaction_id = %transaction.id,
            merchant_id = %merchant.id,
            amount = %transaction.amount,
            "created transaction"
        );
        Ok(transaction)
    }

    /// Transaction by id, joined with its merchant and payment method
    pub async fn transaction_or_err(
        &self,
        id: TransactionId,
    ) -> ServiceResult<TransactionDetail> {
        self.store
            .transaction(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(ResourceKind::Transaction, id))
    }

    /// Set a transaction's status, bumping its modification stamp
    pub async fn update_status(
        &self,
        id: TransactionId,
        status: TransactionStatus,
    ) -> ServiceResult<Transaction> {
        let detail = self.transaction_or_err(id).await?;
        let mut transaction = detail.transaction;
        transaction.status = status;
        transaction.modified_at = Utc::now();
        self.store.upsert_transaction(transaction.clone()).await?;
        info!(transaction_id = %id, %status, "updated transaction status");
        Ok(transaction)
    }

    /// Transactions matching an ad-hoc filter
    pub async fn find(&self, filter: &TransactionFilter) -> ServiceResult<Vec<TransactionDetail>> {
        Ok(self
            .store
            .filter_transactions(&filter.predicates())
            .await?)
    }

    /// Unsettled transactions on card-based instruments - the reconciliation
    /// worker's work query
    pub async fn unsettled_card_payments(&self) -> ServiceResult<Vec<TransactionDetail>> {
        let predicates = [
            TransactionPredicate::StatusIn(TransactionStatus::UNSETTLED.to_vec()),
            TransactionPredicate::MethodIn(
                RETRYABLE_METHODS.iter().map(|m| m.to_string()).collect(),
            ),
        ];
        Ok(self.store.filter_transactions(&predicates).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use merchflow_cache::{CacheService, MemoryCache};
    use merchflow_store::MemoryStore;
    use merchflow_types::{Merchant, PaymentMethod};
    use rust_decimal_macros::dec;

    struct Fixture {
        store: Arc<MemoryStore>,
        service: TransactionService,
        merchant: Merchant,
        card: PaymentMethod,
    }

    async fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let merchant = Merchant::new("Alpha Store");
        let card = PaymentMethod::new(merchant.id, "Credit Card", "tok_alpha");
        store.upsert_merchant(merchant.clone()).await.unwrap();
        store.upsert_payment_method(card.clone()).await.unwrap();

        let cache = CacheService::new(Arc::new(MemoryCache::new()));
        let merchants = MerchantService::new(store.clone(), cache);
        let service = TransactionService::new(store.clone(), merchants);
        Fixture {
            store,
            service,
            merchant,
            card,
        }
    }

    #[tokio::test]
    async fn new_transactions_start_pending() {
        let f = fixture().await;
        let tx = f
            .service
            .process_new_transaction(ProcessNewTransactionParams {
                merchant_id: f.merchant.id,
                payment_method_id: f.card.id,
                amount: dec!(42),
                transaction_date: None,
            })
            .await
            .unwrap();

        assert_eq!(tx.status, TransactionStatus::Pending);
        assert_eq!(tx.amount, dec!(42));
        assert!(f.store.transaction(tx.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn method_owned_by_another_merchant_reads_as_not_found() {
        let f = fixture().await;
        let other = Merchant::new("Beta Store");
        let other_card = PaymentMethod::new(other.id, "Credit Card", "tok_beta");
        f.store.upsert_merchant(other.clone()).await.unwrap();
        f.store
            .upsert_payment_method(other_card.clone())
            .await
            .unwrap();

        let err = f
            .service
            .process_new_transaction(ProcessNewTransactionParams {
                merchant_id: f.merchant.id,
                payment_method_id: other_card.id,
                amount: dec!(1),
                transaction_date: None,
            })
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn update_status_persists_and_bumps_modified_at() {
        let f = fixture().await;
        let tx = f
            .service
            .process_new_transaction(ProcessNewTransactionParams {
                merchant_id: f.merchant.id,
                payment_method_id: f.card.id,
                amount: dec!(5),
                transaction_date: None,
            })
            .await
            .unwrap();

        let updated = f
            .service
            .update_status(tx.id, TransactionStatus::Completed)
            .await
            .unwrap();
        assert_eq!(updated.status, TransactionStatus::Completed);
        assert!(updated.modified_at >= tx.modified_at);

        let stored = f.store.transaction(tx.id).await.unwrap().unwrap();
        assert_eq!(stored.transaction.status, TransactionStatus::Completed);
    }

    #[tokio::test]
    async fn find_matches_merchant_name_case_insensitively() {
        let f = fixture().await;
        f.service
            .process_new_transaction(ProcessNewTransactionParams {
                merchant_id: f.merchant.id,
                payment_method_id: f.card.id,
                amount: dec!(10),
                transaction_date: None,
            })
            .await
            .unwrap();

        let filter = TransactionFilter {
            merchant_name: Some("alpha".into()),
            ..Default::default()
        };
        assert_eq!(f.service.find(&filter).await.unwrap().len(), 1);

        let filter = TransactionFilter {
            merchant_name: Some("beta".into()),
            ..Default::default()
        };
        assert!(f.service.find(&filter).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unsettled_card_payments_excludes_settled_and_non_card() {
        let f = fixture().await;
        let cash = PaymentMethod::new(f.merchant.id, "Cash", "");
        f.store.upsert_payment_method(cash.clone()).await.unwrap();

        let pending_card = f
            .service
            .process_new_transaction(ProcessNewTransactionParams {
                merchant_id: f.merchant.id,
                payment_method_id: f.card.id,
                amount: dec!(1),
                transaction_date: None,
            })
            .await
            .unwrap();
        let failed_card = f
            .service
            .process_new_transaction(ProcessNewTransactionParams {
                merchant_id: f.merchant.id,
                payment_method_id: f.card.id,
                amount: dec!(2),
                transaction_date: None,
            })
            .await
            .unwrap();
        f.service
            .update_status(failed_card.id, TransactionStatus::Failed)
            .await
            .unwrap();

        // Completed card and pending cash transactions are not eligible
        let completed_card = f
            .service
            .process_new_transaction(ProcessNewTransactionParams {
                merchant_id: f.merchant.id,
                payment_method_id: f.card.id,
                amount: dec!(3),
                transaction_date: None,
            })
            .await
            .unwrap();
        f.service
            .update_status(completed_card.id, TransactionStatus::Completed)
            .await
            .unwrap();
        f.service
            .process_new_transaction(ProcessNewTransactionParams {
                merchant_id: f.merchant.id,
                payment_method_id: cash.id,
                amount: dec!(4),
                transaction_date: None,
            })
            .await
            .unwrap();

        let unsettled = f.service.unsettled_card_payments().await.unwrap();
        let mut ids: Vec<_> = unsettled.iter().map(|d| d.transaction.id).collect();
        ids.sort_by_key(|id| id.as_uuid().to_string());
        let mut expected = vec![pending_card.id, failed_card.id];
        expected.sort_by_key(|id| id.as_uuid().to_string());
        assert_eq!(ids, expected);
    }
}
