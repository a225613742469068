//! Spending report aggregation
//!
//! Pure computation over a card's stored transactions. Reports are never
//! persisted, so re-running over the same rows always yields the same
//! report.

use std::collections::BTreeMap;

use crate::models::{LargestTransaction, Report, Transaction};

/// Whether a row counts as spending
///
/// Spending is debits only; bill payments are money moved onto the card and
/// cashback-flagged debits are reversals accounted against cashback.
/// Hidden charges stay inside spend and are surfaced separately.
fn is_spend(t: &Transaction) -> bool {
    !t.is_credit && !t.is_bill_payment && !t.is_cashback
}

/// Compute the report for one card's transactions
pub fn compute_report(transactions: &[Transaction]) -> Report {
    let mut total_spend = 0.0;
    let mut total_cashback = 0.0;
    let mut total_hidden_charges = 0.0;
    let mut category_spend: BTreeMap<_, f64> = BTreeMap::new();
    let mut largest: Option<&Transaction> = None;
    let mut cashback_count = 0;
    let mut hidden_charge_count = 0;

    for t in transactions {
        if t.is_cashback {
            if t.is_credit {
                total_cashback += t.amount;
                cashback_count += 1;
            } else {
                total_cashback -= t.amount;
            }
        }

        // Debits only, so total_spend >= total_hidden_charges always holds
        if t.is_hidden_charge && !t.is_credit {
            total_hidden_charges += t.amount;
            hidden_charge_count += 1;
        }

        if is_spend(t) {
            total_spend += t.amount;
            *category_spend.entry(t.category).or_insert(0.0) += t.amount;

            // Ties: earlier date wins, then earlier row (rows arrive in id order)
            let better = match largest {
                None => true,
                Some(best) => {
                    t.amount > best.amount || (t.amount == best.amount && t.date < best.date)
                }
            };
            if better {
                largest = Some(t);
            }
        }
    }

    Report {
        total_spend,
        total_cashback,
        total_hidden_charges,
        net_spend: total_spend - total_cashback,
        category_spend,
        largest_transaction: largest.map(|t| LargestTransaction {
            date: t.date,
            description: t.description.clone(),
            amount: t.amount,
            category: t.category,
        }),
        transaction_count: transactions.len(),
        cashback_count,
        hidden_charge_count,
    }
}
