//! Wrapped CLI - Credit-card statement analyzer
//!
//! Usage:
//!   wrapped init                          Initialize database
//!   wrapped cards add --name "HDFC Regalia" --last4 1234 --bank hdfc
//!   wrapped import --card 1 --files jan.pdf feb.pdf --password 1234
//!   wrapped report --card 1               Show the spending report
//!   wrapped serve --port 3000             Start web server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db, cli.no_encrypt),
        Commands::Serve {
            port,
            host,
            static_dir,
            origin,
        } => {
            commands::cmd_serve(
                &cli.db,
                &host,
                port,
                cli.no_encrypt,
                static_dir.as_deref(),
                origin,
            )
            .await
        }
        Commands::Cards { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                None | Some(CardsAction::List) => commands::cmd_cards_list(&db),
                Some(CardsAction::Add { name, last4, bank }) => {
                    commands::cmd_cards_add(&db, &name, &last4, &bank)
                }
                Some(CardsAction::Delete { id }) => commands::cmd_cards_delete(&db, id),
            }
        }
        Commands::Import {
            files,
            card,
            password,
        } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_import(&db, card, &files, password.as_deref())
        }
        Commands::Transactions { card, limit } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_transactions(&db, card, limit)
        }
        Commands::Report { card, json } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_report(&db, card, json)
        }
        Commands::Export { card, output } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_export(&db, card, output.as_deref())
        }
        Commands::Reset { yes } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_reset(&db, yes)
        }
    }
}
