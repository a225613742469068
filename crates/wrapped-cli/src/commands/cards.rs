//! Card registry command implementations

use anyhow::Result;
use wrapped_core::{Bank, Database};

use super::truncate;

pub fn cmd_cards_list(db: &Database) -> Result<()> {
    let cards = db.list_cards()?;

    if cards.is_empty() {
        println!("No cards registered. Add one with:");
        println!("  wrapped cards add --name \"HDFC Regalia\" --last4 1234 --bank hdfc");
        return Ok(());
    }

    println!();
    println!("💳 Registered Cards");
    println!("   ─────────────────────────────────────────────────");

    for card in cards {
        let count = db.count_transactions(card.id)?;
        println!(
            "   [{}] {:30} │ •••• {} │ {:5} │ {} txns",
            card.id,
            truncate(&card.name, 30),
            card.last_4_digits,
            card.bank.as_str(),
            count
        );
    }

    Ok(())
}

pub fn cmd_cards_add(db: &Database, name: &str, last4: &str, bank_str: &str) -> Result<()> {
    let bank: Bank = bank_str
        .parse()
        .map_err(|_| anyhow::anyhow!("Unknown bank: {}. Use hdfc, axis or other", bank_str))?;

    let card = db.create_card(name, last4, bank)?;

    println!(
        "✅ Registered card [{}] {} (•••• {}, {})",
        card.id,
        card.name,
        card.last_4_digits,
        card.bank.as_str()
    );
    println!();
    println!("   Import statements with:");
    println!("   wrapped import --card {} --files statement.pdf", card.id);

    Ok(())
}

pub fn cmd_cards_delete(db: &Database, id: i64) -> Result<()> {
    let card = db
        .get_card(id)?
        .ok_or_else(|| anyhow::anyhow!("Card {} not found", id))?;

    db.delete_card(id)?;

    println!(
        "✅ Deleted card [{}] {} and all its imported data.",
        id, card.name
    );

    Ok(())
}
