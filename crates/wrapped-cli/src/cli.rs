//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Wrapped - Credit-card spending, decoded from your statements
#[derive(Parser)]
#[command(name = "wrapped")]
#[command(about = "Self-hosted credit-card statement analyzer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "wrapped.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended for production)
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set WRAPPED_DB_KEY environment variable with your passphrase.
    /// Use --no-encrypt only for development or testing.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Directory containing static files to serve (e.g., ui/dist)
        #[arg(long)]
        static_dir: Option<PathBuf>,

        /// Allowed CORS origin (repeatable; default is same-origin only)
        #[arg(long)]
        origin: Vec<String>,
    },

    /// Manage cards (list, add, delete)
    Cards {
        #[command(subcommand)]
        action: Option<CardsAction>,
    },

    /// Import statement PDFs for a card
    Import {
        /// Statement PDF files to import
        #[arg(short, long, required = true, num_args = 1..)]
        files: Vec<PathBuf>,

        /// Card ID to import into
        #[arg(short, long)]
        card: i64,

        /// Password for encrypted statements (shared by all files)
        #[arg(long)]
        password: Option<String>,
    },

    /// List a card's transactions
    Transactions {
        /// Card ID
        #[arg(short, long)]
        card: i64,

        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: i64,
    },

    /// Show a card's spending report
    Report {
        /// Card ID
        #[arg(short, long)]
        card: i64,

        /// Emit the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Export a card's transactions as CSV
    Export {
        /// Card ID
        #[arg(short, long)]
        card: i64,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Clear all imported transactions and statements (cards are kept)
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum CardsAction {
    /// List registered cards
    List,

    /// Register a card
    Add {
        /// Display name, e.g. "HDFC Regalia"
        #[arg(short, long)]
        name: String,

        /// Last four digits of the card number
        #[arg(short, long)]
        last4: String,

        /// Bank: hdfc, axis or other
        #[arg(short, long, default_value = "other")]
        bank: String,
    },

    /// Delete a card and all its imports
    Delete {
        /// Card ID
        id: i64,
    },
}
