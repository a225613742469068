//! Statement import command implementation

use std::path::PathBuf;

use anyhow::{Context, Result};
use wrapped_core::{normalize, parse_statement, Categorizer, Database};

pub fn cmd_import(
    db: &Database,
    card_id: i64,
    files: &[PathBuf],
    password: Option<&str>,
) -> Result<()> {
    let card = db
        .get_card(card_id)?
        .ok_or_else(|| anyhow::anyhow!("Card {} not found. Run 'wrapped cards' to list cards", card_id))?;

    println!(
        "📥 Importing {} file(s) into [{}] {} ({})...",
        files.len(),
        card.id,
        card.name,
        card.bank.as_str()
    );

    let categorizer = Categorizer::from_env();

    let mut total_inserted = 0;
    let mut total_duplicates = 0;
    let mut failed = 0;

    for file in files {
        let filename = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.display().to_string());

        let data = std::fs::read(file)
            .with_context(|| format!("Failed to read file: {}", file.display()))?;

        // One bad statement should not abort the rest of the batch
        let items = match parse_statement(&data, password, card.bank) {
            Ok(items) => items,
            Err(e) => {
                println!("   ❌ {}: {}", filename, e);
                failed += 1;
                continue;
            }
        };

        let batch = normalize(items, &categorizer);
        let import = db.import_statement(card.id, &filename, &batch.transactions)?;

        let duplicates = import.duplicates + batch.duplicates_dropped;
        println!(
            "   ✅ {}: {} imported, {} duplicate(s) skipped",
            filename, import.inserted, duplicates
        );

        total_inserted += import.inserted;
        total_duplicates += duplicates;
    }

    println!();
    println!("✅ Import complete!");
    println!("   Imported: {}", total_inserted);
    println!("   Skipped (duplicates): {}", total_duplicates);
    if failed > 0 {
        println!("   Failed files: {}", failed);
    }
    if total_inserted > 0 {
        println!();
        println!("   See the report with: wrapped report --card {}", card.id);
    }

    Ok(())
}
