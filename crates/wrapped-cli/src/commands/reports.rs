//! Transaction listing, report and export command implementations

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use wrapped_core::{compute_report, export_transactions_csv, Card, Database};

use super::truncate;

fn require_card(db: &Database, card_id: i64) -> Result<Card> {
    db.get_card(card_id)?
        .ok_or_else(|| anyhow::anyhow!("Card {} not found. Run 'wrapped cards' to list cards", card_id))
}

pub fn cmd_transactions(db: &Database, card_id: i64, limit: i64) -> Result<()> {
    let card = require_card(db, card_id)?;
    let transactions = db.list_transactions(card.id, limit, 0)?;

    if transactions.is_empty() {
        println!("No transactions found. Import some with:");
        println!("  wrapped import --card {} --files statement.pdf", card.id);
        return Ok(());
    }

    let count = db.count_transactions(card.id)?;

    println!();
    println!("📝 Recent Transactions for {} ({} total)", card.name, count);
    println!("   ─────────────────────────────────────────────────────────────");

    for tx in transactions {
        let amount_str = if tx.is_credit {
            format!("\x1b[32m+₹{:.2}\x1b[0m", tx.amount) // Green for credits
        } else {
            format!("\x1b[31m₹{:.2}\x1b[0m", tx.amount) // Red for spends
        };

        println!(
            "   {} │ {:>12} │ {:10} │ {}",
            tx.date,
            amount_str,
            tx.category.as_str(),
            truncate(&tx.description, 40)
        );
    }

    Ok(())
}

pub fn cmd_report(db: &Database, card_id: i64, json: bool) -> Result<()> {
    let card = require_card(db, card_id)?;
    let transactions = db.transactions_for_report(card.id)?;
    let report = compute_report(&transactions);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    println!("📊 Spending Report: {} (•••• {})", card.name, card.last_4_digits);
    println!("   ─────────────────────────────────────────────");

    if report.transaction_count == 0 {
        println!("   No transactions imported yet.");
        return Ok(());
    }

    println!("   Total spend:     ₹{:.2}", report.total_spend);
    println!(
        "   Cashback earned: ₹{:.2} ({} entries)",
        report.total_cashback, report.cashback_count
    );
    println!(
        "   Hidden charges:  ₹{:.2} ({} entries)",
        report.total_hidden_charges, report.hidden_charge_count
    );
    println!("   Net spend:       ₹{:.2}", report.net_spend);
    println!("   Transactions:    {}", report.transaction_count);

    if !report.category_spend.is_empty() {
        println!();
        println!("   {:12} │ {:>12} │ {:>6}", "Category", "Amount", "%");
        println!("   ─────────────┼──────────────┼────────");
        for (category, amount) in &report.category_spend {
            let pct = if report.total_spend > 0.0 {
                amount / report.total_spend * 100.0
            } else {
                0.0
            };
            println!(
                "   {:12} │ {:>12.2} │ {:>5.1}%",
                category.as_str(),
                amount,
                pct
            );
        }
    }

    if let Some(largest) = &report.largest_transaction {
        println!();
        println!("   🏆 Largest transaction:");
        println!(
            "      {} │ ₹{:.2} │ {}",
            largest.date,
            largest.amount,
            truncate(&largest.description, 40)
        );
    }

    Ok(())
}

pub fn cmd_export(db: &Database, card_id: i64, output: Option<&Path>) -> Result<()> {
    let card = require_card(db, card_id)?;

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            export_transactions_csv(db, card.id, file)?;

            let count = db.count_transactions(card.id)?;
            println!("✅ Exported {} transactions to {}", count, path.display());
        }
        None => {
            let stdout = std::io::stdout();
            export_transactions_csv(db, card.id, stdout.lock())?;
        }
    }

    Ok(())
}
