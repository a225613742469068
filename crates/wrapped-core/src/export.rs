//! CSV export of a card's transactions

use std::io::Write;

use crate::db::Database;
use crate::error::Result;

/// Write a card's transactions as CSV, newest first
pub fn export_transactions_csv<W: Write>(db: &Database, card_id: i64, writer: W) -> Result<()> {
    let transactions = db.list_transactions(card_id, i64::MAX, 0)?;

    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record([
        "date",
        "description",
        "amount",
        "is_credit",
        "category",
        "is_bill_payment",
        "is_cashback",
        "is_hidden_charge",
    ])?;

    for t in &transactions {
        wtr.write_record([
            t.date.to_string(),
            t.description.clone(),
            format!("{:.2}", t.amount),
            t.is_credit.to_string(),
            t.category.to_string(),
            t.is_bill_payment.to_string(),
            t.is_cashback.to_string(),
            t.is_hidden_charge.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Bank, Category, NewTransaction};
    use chrono::NaiveDate;

    #[test]
    fn test_export_csv() {
        let db = Database::in_memory().unwrap();
        let card = db.create_card("Card", "1234", Bank::Hdfc).unwrap();
        db.import_statement(
            card.id,
            "jan.pdf",
            &[NewTransaction {
                date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
                description: "SWIGGY BANGALORE".to_string(),
                amount: 450.0,
                is_credit: false,
                category: Category::Dining,
                is_bill_payment: false,
                is_cashback: false,
                is_hidden_charge: false,
                dedup_hash: "a".to_string(),
            }],
        )
        .unwrap();

        let mut out = Vec::new();
        export_transactions_csv(&db, card.id, &mut out).unwrap();
        let csv = String::from_utf8(out).unwrap();

        assert!(csv.starts_with("date,description,amount"));
        assert!(csv.contains("2024-01-15,SWIGGY BANGALORE,450.00,false,Dining"));
    }
}
