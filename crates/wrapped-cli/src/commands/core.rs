//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `cmd_init` - Initialize the database
//! - `cmd_serve` - Start the web server
//! - `cmd_reset` - Clear imported data

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use wrapped_core::Database;

/// Open database with encryption by default, or unencrypted if --no-encrypt
pub fn open_db(db_path: &Path, no_encrypt: bool) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path must be valid UTF-8")?;
    if no_encrypt {
        Database::new_unencrypted(path_str).context("Failed to open database (unencrypted)")
    } else {
        Database::new(path_str).context("Failed to open database")
    }
}

pub fn cmd_init(db_path: &Path, no_encrypt: bool) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let _db = open_db(db_path, no_encrypt)?;

    if no_encrypt {
        println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
    } else {
        println!("   🔒 Encryption: ENABLED");
    }

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Register a card: wrapped cards add --name \"HDFC Regalia\" --last4 1234 --bank hdfc");
    println!("  2. Import a statement: wrapped import --card 1 --files statement.pdf");
    println!("  3. See the report: wrapped report --card 1");

    Ok(())
}

pub async fn cmd_serve(
    db_path: &Path,
    host: &str,
    port: u16,
    no_encrypt: bool,
    static_dir: Option<&Path>,
    origins: Vec<String>,
) -> Result<()> {
    println!("🚀 Starting Wrapped web server...");
    println!("   Database: {}", db_path.display());
    println!("   Listening: http://{}:{}", host, port);
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }
    if !origins.is_empty() {
        println!("   CORS origins: {}", origins.join(", "));
    }
    if no_encrypt {
        println!("   ⚠️  Encryption DISABLED (--no-encrypt)");
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let db = open_db(db_path, no_encrypt)?;

    let static_dir_str = static_dir
        .map(|p| p.to_str().context("static_dir path must be valid UTF-8"))
        .transpose()?;
    let config = wrapped_server::ServerConfig {
        allowed_origins: origins,
    };
    wrapped_server::serve_with_config(db, host, port, static_dir_str, config).await?;

    Ok(())
}

pub fn cmd_reset(db: &Database, yes: bool) -> Result<()> {
    if !yes {
        print!("⚠️  This will DELETE all imported transactions and statements.\n");
        print!("   Registered cards are kept.\n\nAre you sure? [y/N] ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    db.reset_transactions()?;

    println!("✅ Cleared all transactions and statements.");

    Ok(())
}
