//! Domain models for Wrapped

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A registered credit card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub id: i64,
    /// Display name, e.g. "HDFC Regalia"
    pub name: String,
    /// Exactly four ASCII digits
    pub last_4_digits: String,
    pub bank: Bank,
    pub created_at: DateTime<Utc>,
}

/// Supported banks for statement parsing
///
/// The card's bank selects the preferred statement format; `Other` relies
/// on auto-detection alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bank {
    Hdfc,
    Axis,
    Other,
}

impl Bank {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hdfc => "hdfc",
            Self::Axis => "axis",
            Self::Other => "other",
        }
    }
}

impl std::str::FromStr for Bank {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hdfc" => Ok(Self::Hdfc),
            "axis" => Ok(Self::Axis),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown bank: {}", s)),
        }
    }
}

impl std::fmt::Display for Bank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Spending categories - a closed taxonomy with `Other` as the escape hatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Groceries,
    Dining,
    Shopping,
    Travel,
    Bills,
    Health,
    Fees,
    Cashback,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Groceries => "Groceries",
            Self::Dining => "Dining",
            Self::Shopping => "Shopping",
            Self::Travel => "Travel",
            Self::Bills => "Bills",
            Self::Health => "Health",
            Self::Fees => "Fees",
            Self::Cashback => "Cashback",
            Self::Other => "Other",
        }
    }

    /// All categories, in display order.
    pub fn all() -> &'static [Category] {
        &[
            Self::Groceries,
            Self::Dining,
            Self::Shopping,
            Self::Travel,
            Self::Bills,
            Self::Health,
            Self::Fees,
            Self::Cashback,
            Self::Other,
        ]
    }

    /// Map a free-form label (e.g. an Axis merchant-category cell) onto the
    /// taxonomy. Returns `None` when the label carries no usable signal.
    pub fn from_label(label: &str) -> Option<Category> {
        let upper = label.trim().to_uppercase();
        if upper.is_empty() {
            return None;
        }
        let table: &[(&str, Category)] = &[
            ("GROCER", Category::Groceries),
            ("SUPERMARKET", Category::Groceries),
            ("RESTAURANT", Category::Dining),
            ("DINING", Category::Dining),
            ("FOOD", Category::Dining),
            ("CAFE", Category::Dining),
            ("SHOPPING", Category::Shopping),
            ("RETAIL", Category::Shopping),
            ("APPAREL", Category::Shopping),
            ("DEPARTMENT", Category::Shopping),
            ("TRAVEL", Category::Travel),
            ("AIRLINE", Category::Travel),
            ("HOTEL", Category::Travel),
            ("FUEL", Category::Travel),
            ("TRANSPORT", Category::Travel),
            ("UTILIT", Category::Bills),
            ("TELECOM", Category::Bills),
            ("INSURANCE", Category::Bills),
            ("ENTERTAINMENT", Category::Bills),
            ("PHARMA", Category::Health),
            ("HOSPITAL", Category::Health),
            ("MEDICAL", Category::Health),
            ("FEE", Category::Fees),
            ("CHARGE", Category::Fees),
        ];
        table
            .iter()
            .find(|(kw, _)| upper.contains(kw))
            .map(|(_, c)| *c)
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "groceries" => Ok(Self::Groceries),
            "dining" => Ok(Self::Dining),
            "shopping" => Ok(Self::Shopping),
            "travel" => Ok(Self::Travel),
            "bills" => Ok(Self::Bills),
            "health" => Ok(Self::Health),
            "fees" => Ok(Self::Fees),
            "cashback" => Ok(Self::Cashback),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One accepted statement upload (provenance for its transactions)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Statement {
    pub id: i64,
    pub card_id: i64,
    pub filename: String,
    pub uploaded_at: DateTime<Utc>,
}

/// A raw line item extracted from a statement PDF, before normalization
#[derive(Debug, Clone, PartialEq)]
pub struct RawLineItem {
    pub date: NaiveDate,
    pub description: String,
    /// Magnitude only; direction lives in `is_credit`
    pub amount: f64,
    pub is_credit: bool,
    /// Bank-provided category label, when the statement carries one
    pub bank_category: Option<String>,
}

/// A normalized, categorized transaction ready for insertion
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    pub is_credit: bool,
    pub category: Category,
    pub is_bill_payment: bool,
    pub is_cashback: bool,
    pub is_hidden_charge: bool,
    /// sha256 over (date, description, amount, is_credit)
    pub dedup_hash: String,
}

/// A stored transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub card_id: i64,
    pub statement_id: Option<i64>,
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    pub is_credit: bool,
    pub category: Category,
    pub is_bill_payment: bool,
    pub is_cashback: bool,
    pub is_hidden_charge: bool,
    pub created_at: DateTime<Utc>,
}

/// The largest single purchase on a card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LargestTransaction {
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    pub category: Category,
}

/// Aggregated spending report for one card
///
/// Always recomputed from the stored transactions; never persisted. An empty
/// transaction set yields the all-zero report with `largest_transaction`
/// absent, which callers treat as "no data yet" rather than an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Report {
    pub total_spend: f64,
    pub total_cashback: f64,
    pub total_hidden_charges: f64,
    pub net_spend: f64,
    /// Debit, non-bill-payment amounts grouped by category
    pub category_spend: BTreeMap<Category, f64>,
    pub largest_transaction: Option<LargestTransaction>,
    pub transaction_count: usize,
    pub cashback_count: usize,
    pub hidden_charge_count: usize,
}
