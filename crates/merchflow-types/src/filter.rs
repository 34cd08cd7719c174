//! Transaction filtering
//!
//! Ad-hoc transaction queries are described by [`TransactionFilter`], a bag of
//! independently-optional criteria. [`TransactionFilter::predicates`] composes
//! it into an ordered list of [`TransactionPredicate`] values - one per
//! supplied field, nothing for absent fields - which the store combines with
//! logical AND. No criteria supplied means an empty predicate list and an
//! unfiltered result set.
//!
//! Predicates are plain enum values evaluated directly against the joined
//! transaction shape; there is no expression-tree machinery.

use crate::{MerchantId, PaymentMethodId, TransactionDetail, TransactionStatus};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Optional criteria for an ad-hoc transaction query
///
/// Empty strings are treated the same as absent fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionFilter {
    pub merchant_id: Option<MerchantId>,
    /// Case-insensitive substring match on the merchant display name
    pub merchant_name: Option<String>,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
    /// Inclusive lower bound on the transaction date
    pub start_date: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the transaction date
    pub end_date: Option<DateTime<Utc>>,
    pub status: Option<TransactionStatus>,
    pub payment_method_id: Option<PaymentMethodId>,
    /// Exact match on the instrument label
    pub method: Option<String>,
}

impl TransactionFilter {
    /// Compose the filter into predicates, one per present field
    pub fn predicates(&self) -> Vec<TransactionPredicate> {
        let mut predicates = Vec::new();
        if let Some(merchant_id) = self.merchant_id {
            predicates.push(TransactionPredicate::MerchantId(merchant_id));
        }
        if let Some(name) = self.merchant_name.as_deref().filter(|s| !s.is_empty()) {
            predicates.push(TransactionPredicate::MerchantNameContains(name.to_string()));
        }
        if let Some(min) = self.min_amount {
            predicates.push(TransactionPredicate::MinAmount(min));
        }
        if let Some(max) = self.max_amount {
            predicates.push(TransactionPredicate::MaxAmount(max));
        }
        if let Some(start) = self.start_date {
            predicates.push(TransactionPredicate::StartDate(start));
        }
        if let Some(end) = self.end_date {
            predicates.push(TransactionPredicate::EndDate(end));
        }
        if let Some(status) = self.status {
            predicates.push(TransactionPredicate::Status(status));
        }
        if let Some(method_id) = self.payment_method_id {
            predicates.push(TransactionPredicate::PaymentMethodId(method_id));
        }
        if let Some(method) = self.method.as_deref().filter(|s| !s.is_empty()) {
            predicates.push(TransactionPredicate::Method(method.to_string()));
        }
        predicates
    }
}

/// A single boolean-valued condition on one attribute of a transaction
///
/// The set-valued variants (`StatusIn`, `MethodIn`) exist for callers that
/// need within-field alternatives, such as the reconciliation worker's
/// unsettled-card query; [`TransactionFilter::predicates`] never emits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TransactionPredicate {
    MerchantId(MerchantId),
    MerchantNameContains(String),
    MinAmount(Decimal),
    MaxAmount(Decimal),
    StartDate(DateTime<Utc>),
    EndDate(DateTime<Utc>),
    /// Strict upper bound, used for half-open windows such as a report day
    Before(DateTime<Utc>),
    Status(TransactionStatus),
    StatusIn(Vec<TransactionStatus>),
    PaymentMethodId(PaymentMethodId),
    Method(String),
    MethodIn(Vec<String>),
}

impl TransactionPredicate {
    /// Evaluate the predicate against a joined transaction
    pub fn matches(&self, detail: &TransactionDetail) -> bool {
        let tx = &detail.transaction;
        match self {
            Self::MerchantId(id) => tx.merchant_id == *id,
            Self::MerchantNameContains(needle) => detail
                .merchant
                .name
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            Self::MinAmount(min) => tx.amount >= *min,
            Self::MaxAmount(max) => tx.amount <= *max,
            Self::StartDate(start) => tx.transaction_date >= *start,
            Self::EndDate(end) => tx.transaction_date <= *end,
            Self::Before(end) => tx.transaction_date < *end,
            Self::Status(status) => tx.status == *status,
            Self::StatusIn(statuses) => statuses.contains(&tx.status),
            Self::PaymentMethodId(id) => tx.payment_method_id == *id,
            Self::Method(method) => detail.payment_method.method == *method,
            Self::MethodIn(methods) => methods.contains(&detail.payment_method.method),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Merchant, PaymentMethod, Transaction};
    use rust_decimal_macros::dec;

    fn detail(merchant_name: &str, method: &str, amount: Decimal) -> TransactionDetail {
        let merchant = Merchant::new(merchant_name);
        let payment_method = PaymentMethod::new(merchant.id, method, "tok_xxx");
        let transaction = Transaction::new(merchant.id, payment_method.id, amount, Utc::now());
        TransactionDetail {
            transaction,
            merchant,
            payment_method,
        }
    }

    #[test]
    fn empty_filter_yields_no_predicates() {
        assert!(TransactionFilter::default().predicates().is_empty());
    }

    #[test]
    fn empty_strings_are_treated_as_absent() {
        let filter = TransactionFilter {
            merchant_name: Some(String::new()),
            method: Some(String::new()),
            ..Default::default()
        };
        assert!(filter.predicates().is_empty());
    }

    #[test]
    fn one_predicate_per_present_field() {
        let filter = TransactionFilter {
            merchant_id: Some(MerchantId::new()),
            min_amount: Some(dec!(5)),
            status: Some(TransactionStatus::Completed),
            ..Default::default()
        };
        assert_eq!(filter.predicates().len(), 3);
    }

    #[test]
    fn merchant_name_match_is_case_insensitive_substring() {
        let d = detail("Alpha Store", "Credit Card", dec!(10));
        assert!(TransactionPredicate::MerchantNameContains("alpha".into()).matches(&d));
        assert!(TransactionPredicate::MerchantNameContains("STORE".into()).matches(&d));
        assert!(!TransactionPredicate::MerchantNameContains("beta".into()).matches(&d));
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let d = detail("Alpha", "Cash", dec!(1));
        let at = d.transaction.transaction_date;
        assert!(TransactionPredicate::StartDate(at).matches(&d));
        assert!(TransactionPredicate::EndDate(at).matches(&d));
    }

    #[test]
    fn before_bound_is_exclusive() {
        let d = detail("Alpha", "Cash", dec!(1));
        let at = d.transaction.transaction_date;
        assert!(!TransactionPredicate::Before(at).matches(&d));
        assert!(TransactionPredicate::Before(at + chrono::Duration::seconds(1)).matches(&d));
    }

    #[test]
    fn amount_bounds_are_inclusive() {
        let d = detail("Alpha", "Cash", dec!(10));
        assert!(TransactionPredicate::MinAmount(dec!(10)).matches(&d));
        assert!(TransactionPredicate::MaxAmount(dec!(10)).matches(&d));
        assert!(!TransactionPredicate::MinAmount(dec!(10.01)).matches(&d));
    }

    #[test]
    fn set_valued_predicates_match_any_member() {
        let d = detail("Alpha", "Debit Card", dec!(2));
        let statuses = TransactionPredicate::StatusIn(TransactionStatus::UNSETTLED.to_vec());
        let methods =
            TransactionPredicate::MethodIn(vec!["Credit Card".into(), "Debit Card".into()]);
        assert!(statuses.matches(&d));
        assert!(methods.matches(&d));
        assert!(!TransactionPredicate::MethodIn(vec!["Cash".into()]).matches(&d));
    }
}
