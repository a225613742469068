//! Wrapped Core Library
//!
//! Shared functionality for the Wrapped credit-card spending tool:
//! - Database access and migrations
//! - Statement PDF parsing for Indian bank formats
//! - Normalization, deduplication and flag tagging
//! - Merchant categorization (naive Bayes with rule fallback)
//! - Spending report aggregation
//! - CSV export

pub mod categorize;
pub mod db;
pub mod error;
pub mod export;
pub mod models;
pub mod normalize;
pub mod report;
pub mod statement;

pub use categorize::{Categorize, Categorizer, NaiveBayesModel, RuleCategorizer};
pub use db::{Database, StatementImport};
pub use error::{Error, Result};
pub use export::export_transactions_csv;
pub use models::{
    Bank, Card, Category, LargestTransaction, NewTransaction, RawLineItem, Report, Statement,
    Transaction,
};
pub use normalize::{normalize, NormalizedBatch};
pub use report::compute_report;
pub use statement::{parse_statement, parse_text, StatementFormat};
