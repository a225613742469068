//! Card registry operations

use rusqlite::params;

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{Bank, Card};

fn card_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Card> {
    let bank_str: String = row.get(3)?;
    let created_at_str: String = row.get(4)?;

    Ok(Card {
        id: row.get(0)?,
        name: row.get(1)?,
        last_4_digits: row.get(2)?,
        bank: bank_str.parse().unwrap_or(Bank::Other),
        created_at: parse_datetime(&created_at_str),
    })
}

impl Database {
    /// Register a card
    ///
    /// `last_4_digits` must be exactly four ASCII digits. Registering the
    /// same (name, last four) pair twice returns the existing card.
    pub fn create_card(&self, name: &str, last_4_digits: &str, bank: Bank) -> Result<Card> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidData("card name cannot be empty".to_string()));
        }
        if last_4_digits.len() != 4 || !last_4_digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(Error::InvalidData(format!(
                "last_4_digits must be exactly four digits, got {:?}",
                last_4_digits
            )));
        }

        let conn = self.conn()?;

        let existing: Option<i64> = conn
            .query_row(
                "SELECT id FROM cards WHERE name = ? AND last_4_digits = ?",
                params![name, last_4_digits],
                |row| row.get(0),
            )
            .ok();

        let id = match existing {
            Some(id) => id,
            None => {
                conn.execute(
                    "INSERT INTO cards (name, last_4_digits, bank) VALUES (?, ?, ?)",
                    params![name, last_4_digits, bank.as_str()],
                )?;
                conn.last_insert_rowid()
            }
        };
        drop(conn);

        self.get_card(id)?
            .ok_or_else(|| Error::NotFound(format!("card {}", id)))
    }

    /// List all cards
    pub fn list_cards(&self) -> Result<Vec<Card>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, last_4_digits, bank, created_at FROM cards ORDER BY name",
        )?;

        let cards = stmt
            .query_map([], card_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(cards)
    }

    /// Get a card by ID
    pub fn get_card(&self, id: i64) -> Result<Option<Card>> {
        let conn = self.conn()?;
        let card = conn
            .query_row(
                "SELECT id, name, last_4_digits, bank, created_at FROM cards WHERE id = ?",
                params![id],
                card_from_row,
            )
            .ok();

        Ok(card)
    }

    /// Delete a card and everything imported for it
    pub fn delete_card(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;

        // Use explicit transaction for atomicity
        conn.execute("BEGIN TRANSACTION", [])?;

        let result = (|| {
            conn.execute("DELETE FROM transactions WHERE card_id = ?", params![id])?;
            conn.execute("DELETE FROM statements WHERE card_id = ?", params![id])?;
            conn.execute("DELETE FROM cards WHERE id = ?", params![id])?;
            Ok(())
        })();

        match result {
            Ok(()) => {
                conn.execute("COMMIT", [])?;
                Ok(())
            }
            Err(e) => {
                let _ = conn.execute("ROLLBACK", []);
                Err(e)
            }
        }
    }
}
