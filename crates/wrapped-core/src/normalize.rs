//! Normalization: flag tagging, dedup hashing, in-batch deduplication

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::categorize::Categorize;
use crate::models::{Category, NewTransaction, RawLineItem};

/// Card bill payments (money moved onto the card, not spending)
const BILL_PAYMENT_MARKERS: &[&str] = &[
    "PAYMENT RECEIVED",
    "AUTOPAY",
    "BBPS",
    "MB/IB PAYMENT",
    "NETBANKING TRANSFER",
    "DUAL PYT",
];

/// Charges banks bury in statements (fees, taxes, surcharges)
const HIDDEN_CHARGE_MARKERS: &[&str] = &["JOINING FEE", "GST", "FUEL SURCHARGE"];

/// A normalized batch, with the number of in-batch duplicates dropped
#[derive(Debug)]
pub struct NormalizedBatch {
    pub transactions: Vec<NewTransaction>,
    pub duplicates_dropped: usize,
}

/// Stable identity for a transaction: same (date, description, amount,
/// direction) always hashes the same, across uploads and overlapping
/// statement periods.
pub fn dedup_hash(item: &RawLineItem) -> String {
    let mut hasher = Sha256::new();
    hasher.update(item.date.to_string().as_bytes());
    hasher.update(b"|");
    hasher.update(item.description.as_bytes());
    hasher.update(b"|");
    hasher.update(item.amount.to_be_bytes());
    hasher.update(b"|");
    hasher.update([item.is_credit as u8]);
    hex::encode(hasher.finalize())
}

pub fn is_bill_payment(description: &str) -> bool {
    let upper = description.to_uppercase();
    BILL_PAYMENT_MARKERS.iter().any(|m| upper.contains(m))
}

pub fn is_cashback(description: &str, is_credit: bool) -> bool {
    is_credit && description.to_uppercase().contains("CASHBACK")
}

/// Hidden charges are debits only; a fee reversal credit mentioning GST is
/// not a charge.
pub fn is_hidden_charge(description: &str, is_credit: bool) -> bool {
    if is_credit {
        return false;
    }
    let upper = description.to_uppercase();
    HIDDEN_CHARGE_MARKERS.iter().any(|m| upper.contains(m))
}

/// Normalize a parsed batch into insert-ready transactions
///
/// Identical line items within the batch collapse to the first occurrence.
/// Categorization precedence: flag overrides (cashback -> Cashback, hidden
/// charge -> Fees), then the bank-provided label, then the classifier.
pub fn normalize(items: Vec<RawLineItem>, categorizer: &dyn Categorize) -> NormalizedBatch {
    let mut seen = std::collections::HashSet::new();
    let mut transactions = Vec::with_capacity(items.len());
    let mut duplicates_dropped = 0;

    for item in items {
        let hash = dedup_hash(&item);
        if !seen.insert(hash.clone()) {
            duplicates_dropped += 1;
            continue;
        }

        let bill_payment = is_bill_payment(&item.description);
        let cashback = is_cashback(&item.description, item.is_credit);
        let hidden_charge = is_hidden_charge(&item.description, item.is_credit);

        let category = if cashback {
            Category::Cashback
        } else if hidden_charge {
            Category::Fees
        } else if let Some(from_bank) = item
            .bank_category
            .as_deref()
            .and_then(Category::from_label)
        {
            from_bank
        } else {
            categorizer.categorize(&item.description)
        };

        transactions.push(NewTransaction {
            date: item.date,
            description: item.description,
            amount: item.amount,
            is_credit: item.is_credit,
            category,
            is_bill_payment: bill_payment,
            is_cashback: cashback,
            is_hidden_charge: hidden_charge,
            dedup_hash: hash,
        });
    }

    debug!(
        kept = transactions.len(),
        dropped = duplicates_dropped,
        "normalized statement batch"
    );

    NormalizedBatch {
        transactions,
        duplicates_dropped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categorize::RuleCategorizer;
    use chrono::NaiveDate;

    fn item(desc: &str, amount: f64, is_credit: bool) -> RawLineItem {
        RawLineItem {
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            description: desc.to_string(),
            amount,
            is_credit,
            bank_category: None,
        }
    }

    #[test]
    fn test_dedup_hash_is_stable_and_direction_aware() {
        let a = item("SWIGGY BANGALORE", 450.0, false);
        let b = item("SWIGGY BANGALORE", 450.0, false);
        assert_eq!(dedup_hash(&a), dedup_hash(&b));

        let credit = item("SWIGGY BANGALORE", 450.0, true);
        assert_ne!(dedup_hash(&a), dedup_hash(&credit));
    }

    #[test]
    fn test_in_batch_dedup_keeps_first() {
        let rules = RuleCategorizer::new();
        let batch = normalize(
            vec![
                item("SWIGGY BANGALORE", 450.0, false),
                item("SWIGGY BANGALORE", 450.0, false),
                item("AMAZON RETAIL", 999.0, false),
            ],
            &rules,
        );
        assert_eq!(batch.transactions.len(), 2);
        assert_eq!(batch.duplicates_dropped, 1);
    }

    #[test]
    fn test_flag_tagging() {
        let rules = RuleCategorizer::new();
        let batch = normalize(
            vec![
                item("PAYMENT RECEIVED - THANK YOU", 5000.0, true),
                item("CASHBACK EARNED", 50.0, true),
                item("GST ON FEES", 18.0, false),
                item("SWIGGY BANGALORE", 450.0, false),
            ],
            &rules,
        );

        let [payment, cashback, gst, swiggy] = &batch.transactions[..] else {
            panic!("expected four transactions");
        };
        assert!(payment.is_bill_payment);
        assert!(cashback.is_cashback);
        assert_eq!(cashback.category, Category::Cashback);
        assert!(gst.is_hidden_charge);
        assert_eq!(gst.category, Category::Fees);
        assert_eq!(swiggy.category, Category::Dining);
    }

    #[test]
    fn test_cashback_requires_credit() {
        // A cashback reversal is a debit and keeps the cashback flag off
        assert!(!is_cashback("CASHBACK REVERSAL", false));
        assert!(is_cashback("CASHBACK EARNED", true));
    }

    #[test]
    fn test_hidden_charge_requires_debit() {
        assert!(is_hidden_charge("GST ON FEES", false));
        assert!(!is_hidden_charge("REVERSAL OF GST CHARGES", true));

        let rules = RuleCategorizer::new();
        let batch = normalize(vec![item("REVERSAL OF GST CHARGES", 118.0, true)], &rules);
        assert!(!batch.transactions[0].is_hidden_charge);
    }

    #[test]
    fn test_bank_category_beats_classifier() {
        let rules = RuleCategorizer::new();
        let mut raw = item("UNKNOWN MERCHANT 123", 100.0, false);
        raw.bank_category = Some("RESTAURANTS".to_string());
        let batch = normalize(vec![raw], &rules);
        assert_eq!(batch.transactions[0].category, Category::Dining);
    }
}
