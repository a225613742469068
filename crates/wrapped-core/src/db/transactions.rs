//! Statement imports and transaction queries

use rusqlite::params;

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::{Category, NewTransaction, Statement, Transaction};

/// Outcome of importing one statement's worth of transactions
#[derive(Debug, Clone)]
pub struct StatementImport {
    pub statement_id: i64,
    pub inserted: usize,
    /// Rows already present for this card (cross-upload duplicates)
    pub duplicates: usize,
}

fn transaction_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Transaction> {
    let date_str: String = row.get(3)?;
    let category_str: String = row.get(7)?;
    let created_at_str: String = row.get(11)?;

    Ok(Transaction {
        id: row.get(0)?,
        card_id: row.get(1)?,
        statement_id: row.get(2)?,
        date: date_str
            .parse()
            .unwrap_or_else(|_| chrono::Utc::now().date_naive()),
        description: row.get(4)?,
        amount: row.get(5)?,
        is_credit: row.get(6)?,
        category: category_str.parse().unwrap_or(Category::Other),
        is_bill_payment: row.get(8)?,
        is_cashback: row.get(9)?,
        is_hidden_charge: row.get(10)?,
        created_at: parse_datetime(&created_at_str),
    })
}

const TRANSACTION_COLUMNS: &str = "id, card_id, statement_id, date, description, amount, \
     is_credit, category, is_bill_payment, is_cashback, is_hidden_charge, created_at";

impl Database {
    /// Import one parsed statement atomically
    ///
    /// The statement row and its transactions commit together; a failure
    /// rolls the whole file back. `INSERT OR IGNORE` against the per-card
    /// unique dedup hash skips rows already imported for this card, and
    /// `BEGIN IMMEDIATE` serializes concurrent imports so each sees the
    /// other's committed rows.
    pub fn import_statement(
        &self,
        card_id: i64,
        filename: &str,
        transactions: &[NewTransaction],
    ) -> Result<StatementImport> {
        let conn = self.conn()?;

        conn.execute("BEGIN IMMEDIATE", [])?;

        let result = (|| {
            conn.execute(
                "INSERT INTO statements (card_id, filename) VALUES (?, ?)",
                params![card_id, filename],
            )?;
            let statement_id = conn.last_insert_rowid();

            let mut inserted = 0;
            let mut duplicates = 0;
            for tx in transactions {
                let changed = conn.execute(
                    r#"
                    INSERT OR IGNORE INTO transactions
                        (card_id, statement_id, date, description, amount, is_credit,
                         category, is_bill_payment, is_cashback, is_hidden_charge, dedup_hash)
                    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                    "#,
                    params![
                        card_id,
                        statement_id,
                        tx.date.to_string(),
                        tx.description,
                        tx.amount,
                        tx.is_credit,
                        tx.category.as_str(),
                        tx.is_bill_payment,
                        tx.is_cashback,
                        tx.is_hidden_charge,
                        tx.dedup_hash,
                    ],
                )?;
                if changed == 1 {
                    inserted += 1;
                } else {
                    duplicates += 1;
                }
            }

            Ok(StatementImport {
                statement_id,
                inserted,
                duplicates,
            })
        })();

        match result {
            Ok(import) => {
                conn.execute("COMMIT", [])?;
                Ok(import)
            }
            Err(e) => {
                let _ = conn.execute("ROLLBACK", []);
                Err(e)
            }
        }
    }

    /// List a card's transactions, newest first
    pub fn list_transactions(
        &self,
        card_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM transactions WHERE card_id = ? \
             ORDER BY date DESC, id DESC LIMIT ? OFFSET ?",
            TRANSACTION_COLUMNS
        ))?;

        let transactions = stmt
            .query_map(params![card_id, limit, offset], transaction_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// All of a card's transactions in insertion order, for report computation
    pub fn transactions_for_report(&self, card_id: i64) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM transactions WHERE card_id = ? ORDER BY id ASC",
            TRANSACTION_COLUMNS
        ))?;

        let transactions = stmt
            .query_map(params![card_id], transaction_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// Count a card's transactions
    pub fn count_transactions(&self, card_id: i64) -> Result<i64> {
        let conn = self.conn()?;
        let count = conn.query_row(
            "SELECT COUNT(*) FROM transactions WHERE card_id = ?",
            params![card_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// List a card's statement uploads, newest first
    pub fn list_statements(&self, card_id: i64) -> Result<Vec<Statement>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, card_id, filename, uploaded_at FROM statements \
             WHERE card_id = ? ORDER BY uploaded_at DESC, id DESC",
        )?;

        let statements = stmt
            .query_map(params![card_id], |row| {
                let uploaded_at_str: String = row.get(3)?;
                Ok(Statement {
                    id: row.get(0)?,
                    card_id: row.get(1)?,
                    filename: row.get(2)?,
                    uploaded_at: parse_datetime(&uploaded_at_str),
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(statements)
    }
}
