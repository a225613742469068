use chrono::NaiveDate;

use super::Database;
use crate::models::{Bank, Category, NewTransaction};

fn new_tx(desc: &str, amount: f64, hash: &str) -> NewTransaction {
    NewTransaction {
        date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        description: desc.to_string(),
        amount,
        is_credit: false,
        category: Category::Other,
        is_bill_payment: false,
        is_cashback: false,
        is_hidden_charge: false,
        dedup_hash: hash.to_string(),
    }
}

#[test]
fn test_create_and_get_card() {
    let db = Database::in_memory().unwrap();
    let card = db.create_card("HDFC Regalia", "1234", Bank::Hdfc).unwrap();
    assert_eq!(card.last_4_digits, "1234");
    assert_eq!(card.bank, Bank::Hdfc);

    let fetched = db.get_card(card.id).unwrap().unwrap();
    assert_eq!(fetched.name, "HDFC Regalia");
}

#[test]
fn test_create_card_validates_last_four() {
    let db = Database::in_memory().unwrap();
    assert!(db.create_card("Bad", "12a4", Bank::Other).is_err());
    assert!(db.create_card("Bad", "12345", Bank::Other).is_err());
    assert!(db.create_card("", "1234", Bank::Other).is_err());
}

#[test]
fn test_create_card_is_idempotent() {
    let db = Database::in_memory().unwrap();
    let a = db.create_card("Axis Ace", "9876", Bank::Axis).unwrap();
    let b = db.create_card("Axis Ace", "9876", Bank::Axis).unwrap();
    assert_eq!(a.id, b.id);
    assert_eq!(db.list_cards().unwrap().len(), 1);
}

#[test]
fn test_import_statement_skips_duplicates_across_uploads() {
    let db = Database::in_memory().unwrap();
    let card = db.create_card("HDFC Regalia", "1234", Bank::Hdfc).unwrap();

    let batch_a: Vec<_> = (0..5).map(|i| new_tx("SHOP", 10.0 + i as f64, &format!("h{}", i))).collect();
    let first = db.import_statement(card.id, "jan.pdf", &batch_a).unwrap();
    assert_eq!(first.inserted, 5);
    assert_eq!(first.duplicates, 0);

    // Second upload shares three hashes with the first
    let batch_b: Vec<_> = (2..7).map(|i| new_tx("SHOP", 10.0 + i as f64, &format!("h{}", i))).collect();
    let second = db.import_statement(card.id, "feb.pdf", &batch_b).unwrap();
    assert_eq!(second.inserted, 2);
    assert_eq!(second.duplicates, 3);

    assert_eq!(db.count_transactions(card.id).unwrap(), 7);
    assert_eq!(db.list_statements(card.id).unwrap().len(), 2);
}

#[test]
fn test_reupload_is_idempotent() {
    let db = Database::in_memory().unwrap();
    let card = db.create_card("HDFC Regalia", "1234", Bank::Hdfc).unwrap();

    let batch = vec![new_tx("SWIGGY", 450.0, "a"), new_tx("AMAZON", 999.0, "b")];
    db.import_statement(card.id, "jan.pdf", &batch).unwrap();
    let again = db.import_statement(card.id, "jan.pdf", &batch).unwrap();

    assert_eq!(again.inserted, 0);
    assert_eq!(again.duplicates, 2);
    assert_eq!(db.count_transactions(card.id).unwrap(), 2);
}

#[test]
fn test_dedup_is_scoped_per_card() {
    let db = Database::in_memory().unwrap();
    let a = db.create_card("Card A", "1111", Bank::Other).unwrap();
    let b = db.create_card("Card B", "2222", Bank::Other).unwrap();

    let batch = vec![new_tx("SWIGGY", 450.0, "same-hash")];
    db.import_statement(a.id, "a.pdf", &batch).unwrap();
    let other = db.import_statement(b.id, "b.pdf", &batch).unwrap();

    assert_eq!(other.inserted, 1);
    assert_eq!(db.count_transactions(b.id).unwrap(), 1);
}

#[test]
fn test_transactions_round_trip_fields() {
    let db = Database::in_memory().unwrap();
    let card = db.create_card("Card", "1234", Bank::Hdfc).unwrap();

    let mut tx = new_tx("CASHBACK EARNED", 50.0, "cb");
    tx.is_credit = true;
    tx.is_cashback = true;
    tx.category = Category::Cashback;
    db.import_statement(card.id, "jan.pdf", &[tx]).unwrap();

    let rows = db.transactions_for_report(card.id).unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].is_credit);
    assert!(rows[0].is_cashback);
    assert_eq!(rows[0].category, Category::Cashback);
    assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
}

#[test]
fn test_list_transactions_newest_first() {
    let db = Database::in_memory().unwrap();
    let card = db.create_card("Card", "1234", Bank::Hdfc).unwrap();

    let mut older = new_tx("OLDER", 10.0, "x");
    older.date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let mut newer = new_tx("NEWER", 20.0, "y");
    newer.date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
    db.import_statement(card.id, "jan.pdf", &[older, newer]).unwrap();

    let rows = db.list_transactions(card.id, 10, 0).unwrap();
    assert_eq!(rows[0].description, "NEWER");
    assert_eq!(rows[1].description, "OLDER");
}

#[test]
fn test_delete_card_removes_imports() {
    let db = Database::in_memory().unwrap();
    let card = db.create_card("Card", "1234", Bank::Hdfc).unwrap();
    db.import_statement(card.id, "jan.pdf", &[new_tx("SWIGGY", 450.0, "a")])
        .unwrap();

    db.delete_card(card.id).unwrap();
    assert!(db.get_card(card.id).unwrap().is_none());
    assert_eq!(db.count_transactions(card.id).unwrap(), 0);
    assert!(db.list_statements(card.id).unwrap().is_empty());
}

#[test]
fn test_reset_transactions_keeps_cards() {
    let db = Database::in_memory().unwrap();
    let card = db.create_card("Card", "1234", Bank::Hdfc).unwrap();
    db.import_statement(card.id, "jan.pdf", &[new_tx("SWIGGY", 450.0, "a")])
        .unwrap();

    db.reset_transactions().unwrap();
    assert_eq!(db.count_transactions(card.id).unwrap(), 0);
    assert_eq!(db.list_cards().unwrap().len(), 1);
}
