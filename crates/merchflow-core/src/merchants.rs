//! Merchant service
//!
//! Read paths go through the cache-aside layer; the store is only touched on
//! a miss. Writes do not invalidate cached entries: a freshly registered
//! payment method may be invisible through `merchant`/`list_merchants` for up
//! to the default TTL (5 minutes). That staleness window is a deliberate
//! trade-off, bounded by the TTL.

use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::{debug, info};

use merchflow_cache::CacheService;
use merchflow_store::Store;
use merchflow_types::{
    Merchant, MerchantId, MerchantReport, PaymentMethod, TransactionDetail, TransactionPredicate,
};

use crate::error::{ResourceKind, ServiceError, ServiceResult};
use crate::params::RegisterPaymentMethodParams;
use crate::{keys, report};

/// Merchant reads, payment-method registration, and the daily report
#[derive(Clone)]
pub struct MerchantService {
    store: Arc<dyn Store>,
    cache: CacheService,
}

impl MerchantService {
    pub fn new(store: Arc<dyn Store>, cache: CacheService) -> Self {
        Self { store, cache }
    }

    /// All merchants, served from cache when possible
    pub async fn list_merchants(&self) -> ServiceResult<Vec<Merchant>> {
        let key = keys::all_merchants();
        if let Some(cached) = self.cache.get::<Vec<Merchant>>(&key).await {
            debug!("merchant list served from cache");
            return Ok(cached);
        }
        let merchants = self.store.list_merchants().await?;
        self.cache.set(&key, &merchants, None).await;
        Ok(merchants)
    }

    /// Merchant by id, served from cache when possible
    pub async fn merchant(&self, id: MerchantId) -> ServiceResult<Option<Merchant>> {
        let key = keys::merchant(id);
        if let Some(cached) = self.cache.get::<Merchant>(&key).await {
            debug!(merchant_id = %id, "merchant served from cache");
            return Ok(Some(cached));
        }
        let merchant = self.store.merchant(id).await?;
        if let Some(merchant) = &merchant {
            self.cache.set(&key, merchant, None).await;
        }
        Ok(merchant)
    }

    /// Merchant by id, or a not-found error
    pub async fn merchant_or_err(&self, id: MerchantId) -> ServiceResult<Merchant> {
        self.merchant(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(ResourceKind::Merchant, id))
    }

    /// Payment methods registered by a merchant
    pub async fn payment_methods(
        &self,
        merchant_id: MerchantId,
    ) -> ServiceResult<Vec<PaymentMethod>> {
        let merchant = self.merchant_or_err(merchant_id).await?;
        Ok(self.store.payment_methods_for(merchant.id).await?)
    }

    /// Register a new payment method for an existing merchant
    ///
    /// Cached merchant records are not invalidated; readers may not see the
    /// new method until the cache entry expires.
    pub async fn register_payment_method(
        &self,
        params: RegisterPaymentMethodParams,
    ) -> ServiceResult<PaymentMethod> {
        let merchant = self.merchant_or_err(params.merchant_id).await?;
        let method = PaymentMethod::new(merchant.id, params.method, params.method_details);
        self.store.upsert_payment_method(method.clone()).await?;
        info!(
            merchant_id = %merchant.id,
            payment_method_id = %method.id,
            method = %method.method,
            "registered payment method"
        );
        Ok(method)
    }

    /// All transactions belonging to a merchant
    pub async fn merchant_transactions(
        &self,
        merchant_id: MerchantId,
    ) -> ServiceResult<Vec<TransactionDetail>> {
        let merchant = self.merchant_or_err(merchant_id).await?;
        Ok(self
            .store
            .filter_transactions(&[TransactionPredicate::MerchantId(merchant.id)])
            .await?)
    }

    /// Daily report for a merchant, defaulting to the current UTC date
    ///
    /// A cache hit bypasses the whole computation, including the
    /// merchant-existence check; the report is cached under the resolved
    /// (merchant id, date) key with the default TTL.
    pub async fn daily_report(
        &self,
        merchant_id: MerchantId,
        date: Option<NaiveDate>,
    ) -> ServiceResult<MerchantReport> {
        let report_date = date.unwrap_or_else(|| Utc::now().date_naive());
        let key = keys::merchant_report(merchant_id, report_date);
        if let Some(cached) = self.cache.get::<MerchantReport>(&key).await {
            debug!(merchant_id = %merchant_id, %report_date, "daily report served from cache");
            return Ok(cached);
        }

        let merchant = self.merchant_or_err(merchant_id).await?;
        let (start, end) = report::day_window(report_date);
        let transactions = self
            .store
            .filter_transactions(&[
                TransactionPredicate::MerchantId(merchant.id),
                TransactionPredicate::StartDate(start),
                TransactionPredicate::Before(end),
            ])
            .await?;

        let report = report::build(merchant.id, report_date, &transactions);
        self.cache.set(&key, &report, None).await;
        info!(
            merchant_id = %merchant.id,
            %report_date,
            transactions = transactions.len(),
            "daily report generated"
        );
        Ok(report)
    }
}
