//! Cache key construction
//!
//! Deterministic strings combining an entity-type tag, an identifier, and
//! (for reports) a date. The tags guarantee no cross-entity collisions.

use chrono::NaiveDate;
use merchflow_types::MerchantId;

/// Key for the full merchant list
pub fn all_merchants() -> String {
    "merchants:all".to_string()
}

/// Key for a single merchant
pub fn merchant(id: MerchantId) -> String {
    format!("merchant:{}", id.as_uuid())
}

/// Key for a merchant's daily report
pub fn merchant_report(id: MerchantId, date: NaiveDate) -> String {
    format!("merchant:{}:report:{}", id.as_uuid(), date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_deterministic_and_distinct() {
        let id = MerchantId::new();
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        assert_eq!(merchant(id), merchant(id));
        assert_ne!(merchant(id), all_merchants());
        assert_ne!(merchant(id), merchant_report(id, date));
        assert!(merchant_report(id, date).ends_with("2024-03-01"));
    }
}
