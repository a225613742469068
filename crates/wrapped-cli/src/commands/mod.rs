//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Core commands (init, serve, reset) and shared utilities (open_db)
//! - `cards` - Card registry commands
//! - `import` - Statement import command
//! - `reports` - Transaction listing, report and export commands

pub mod cards;
pub mod core;
pub mod import;
pub mod reports;

// Re-export command functions for main.rs
pub use cards::*;
pub use core::*;
pub use import::*;
pub use reports::*;

/// Truncate a string to at most `max` characters for table display
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
