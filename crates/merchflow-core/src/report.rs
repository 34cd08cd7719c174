//! Daily report aggregation
//!
//! Pure functions turning a day's transactions into the grouped statistics
//! of [`MerchantReport`]. Fetching and caching live in
//! [`crate::MerchantService::daily_report`].

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Timelike, Utc};
use merchflow_types::{
    HourlyStats, MerchantId, MerchantReport, PaymentMethodStats, ReportSummary, TransactionDetail,
    TransactionStatus,
};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// UTC half-open day window: `[date 00:00:00, date+1 00:00:00)`
pub fn day_window(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.and_time(NaiveTime::MIN).and_utc();
    (start, start + Duration::days(1))
}

/// Aggregate a day's transactions into a report
///
/// The summary is omitted entirely for an empty window - there is no
/// zero-filled summary and no division by zero. Group rows are sorted
/// (label ascending, hour ascending) so the cached artifact is
/// deterministic.
pub fn build(
    merchant_id: MerchantId,
    report_date: NaiveDate,
    transactions: &[TransactionDetail],
) -> MerchantReport {
    let summary = (!transactions.is_empty()).then(|| {
        let total_transactions = transactions.len() as u64;
        let total_amount: Decimal = transactions.iter().map(|d| d.transaction.amount).sum();
        let failed_transactions = transactions
            .iter()
            .filter(|d| d.transaction.status == TransactionStatus::Failed)
            .count() as u64;
        ReportSummary {
            total_transactions,
            total_amount,
            successful_transactions: total_transactions - failed_transactions,
            failed_transactions,
            average_transaction_amount: total_amount / Decimal::from(total_transactions),
        }
    });

    let mut by_method: BTreeMap<String, (u64, Decimal)> = BTreeMap::new();
    let mut by_hour: BTreeMap<u32, (u64, Decimal)> = BTreeMap::new();
    for detail in transactions {
        let amount = detail.transaction.amount;
        let method = by_method
            .entry(detail.payment_method.method.clone())
            .or_default();
        method.0 += 1;
        method.1 += amount;

        let hour = by_hour
            .entry(detail.transaction.transaction_date.hour())
            .or_default();
        hour.0 += 1;
        hour.1 += amount;
    }

    MerchantReport {
        merchant_id,
        report_date,
        summary,
        by_payment_method: by_method
            .into_iter()
            .map(|(method, (count, total_amount))| PaymentMethodStats {
                method,
                count,
                total_amount,
            })
            .collect(),
        by_hour: by_hour
            .into_iter()
            .map(|(hour, (count, total_amount))| HourlyStats {
                hour,
                count,
                total_amount,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use merchflow_types::{Merchant, PaymentMethod, Transaction};
    use rust_decimal_macros::dec;

    fn detail_at(
        merchant: &Merchant,
        method: &PaymentMethod,
        amount: Decimal,
        hour: u32,
    ) -> TransactionDetail {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, hour, 15, 0).unwrap();
        TransactionDetail {
            transaction: Transaction::new(merchant.id, method.id, amount, at),
            merchant: merchant.clone(),
            payment_method: method.clone(),
        }
    }

    fn report_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn window_is_half_open_utc_day() {
        let (start, end) = day_window(report_date());
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap());
    }

    #[test]
    fn summary_arithmetic() {
        let merchant = Merchant::new("Alpha Store");
        let method = PaymentMethod::new(merchant.id, "Credit Card", "tok");
        let transactions = vec![
            detail_at(&merchant, &method, dec!(10), 9),
            detail_at(&merchant, &method, dec!(20), 9),
            detail_at(&merchant, &method, dec!(30), 14),
        ];

        let report = build(merchant.id, report_date(), &transactions);
        let summary = report.summary.unwrap();
        assert_eq!(summary.total_transactions, 3);
        assert_eq!(summary.total_amount, dec!(60));
        assert_eq!(summary.successful_transactions, 3);
        assert_eq!(summary.failed_transactions, 0);
        assert_eq!(summary.average_transaction_amount, dec!(20));
    }

    #[test]
    fn failed_transactions_counted_separately() {
        let merchant = Merchant::new("Alpha Store");
        let method = PaymentMethod::new(merchant.id, "Credit Card", "tok");
        let mut failed = detail_at(&merchant, &method, dec!(5), 10);
        failed.transaction.status = TransactionStatus::Failed;
        let transactions = vec![detail_at(&merchant, &method, dec!(10), 10), failed];

        let summary = build(merchant.id, report_date(), &transactions)
            .summary
            .unwrap();
        assert_eq!(summary.successful_transactions, 1);
        assert_eq!(summary.failed_transactions, 1);
    }

    #[test]
    fn empty_window_yields_no_summary() {
        let report = build(MerchantId::new(), report_date(), &[]);
        assert!(report.summary.is_none());
        assert!(report.by_payment_method.is_empty());
        assert!(report.by_hour.is_empty());
    }

    #[test]
    fn groups_by_method_label_not_identity() {
        let merchant = Merchant::new("Alpha Store");
        // Two distinct Credit Card instruments aggregate together
        let card_a = PaymentMethod::new(merchant.id, "Credit Card", "tok_a");
        let card_b = PaymentMethod::new(merchant.id, "Credit Card", "tok_b");
        let cash = PaymentMethod::new(merchant.id, "Cash", "");
        let transactions = vec![
            detail_at(&merchant, &card_a, dec!(10), 9),
            detail_at(&merchant, &card_b, dec!(15), 11),
            detail_at(&merchant, &cash, dec!(5), 11),
        ];

        let report = build(merchant.id, report_date(), &transactions);
        assert_eq!(report.by_payment_method.len(), 2);
        // Sorted by label: Cash, then Credit Card
        assert_eq!(report.by_payment_method[0].method, "Cash");
        assert_eq!(report.by_payment_method[0].count, 1);
        assert_eq!(report.by_payment_method[1].method, "Credit Card");
        assert_eq!(report.by_payment_method[1].count, 2);
        assert_eq!(report.by_payment_method[1].total_amount, dec!(25));
    }

    #[test]
    fn groups_by_utc_hour() {
        let merchant = Merchant::new("Alpha Store");
        let method = PaymentMethod::new(merchant.id, "Cash", "");
        let transactions = vec![
            detail_at(&merchant, &method, dec!(1), 9),
            detail_at(&merchant, &method, dec!(2), 9),
            detail_at(&merchant, &method, dec!(3), 23),
        ];

        let report = build(merchant.id, report_date(), &transactions);
        assert_eq!(report.by_hour.len(), 2);
        assert_eq!(report.by_hour[0].hour, 9);
        assert_eq!(report.by_hour[0].count, 2);
        assert_eq!(report.by_hour[0].total_amount, dec!(3));
        assert_eq!(report.by_hour[1].hour, 23);
        assert_eq!(report.by_hour[1].count, 1);
    }
}
