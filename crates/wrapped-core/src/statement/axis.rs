//! Axis Bank credit card statement format

use regex::Regex;

use crate::models::RawLineItem;

use super::text::{clean_description, detect_credit, is_footer_row, parse_amount, parse_date};
use super::StatementFormat;

/// Merchant-category labels Axis prints in its MERCHANT CATEGORY column.
/// In extracted text the column collapses into the description, so the
/// trailing token is split back off when it matches this vocabulary.
const CATEGORY_VOCAB: &[&str] = &[
    "RESTAURANTS",
    "DINING",
    "CAFES",
    "GROCERIES",
    "GROCERY",
    "SUPERMARKETS",
    "DEPARTMENT STORES",
    "SHOPPING",
    "RETAIL",
    "APPAREL",
    "ELECTRONICS",
    "TRAVEL",
    "AIRLINES",
    "HOTELS",
    "FUEL",
    "TRANSPORT",
    "UTILITIES",
    "TELECOM",
    "ENTERTAINMENT",
    "INSURANCE",
    "PHARMACY",
    "HEALTHCARE",
];

/// Axis statements carry a header row of DATE / TRANSACTION DETAILS /
/// MERCHANT CATEGORY / AMOUNT (Rs.), and amounts suffixed with Cr or Dr.
pub struct AxisFormat {
    line: Regex,
}

impl AxisFormat {
    pub fn new() -> Self {
        Self {
            line: Regex::new(
                r"^(?P<date>\d{2}[-/]\d{2}[-/]\d{4})\s+(?P<desc>.+?)\s+(?P<amount>[\d,]+\.\d{2})\s*(?P<suffix>Cr|Dr)?$",
            )
            .expect("static pattern"),
        }
    }

    /// Split a trailing merchant-category label off the description
    fn split_category(desc: &str) -> (String, Option<String>) {
        let words: Vec<&str> = desc.split_whitespace().collect();
        // Two-word labels first so "DEPARTMENT STORES" wins over "STORES"
        for take in [2usize, 1] {
            if words.len() > take {
                let tail = words[words.len() - take..].join(" ").to_uppercase();
                if CATEGORY_VOCAB.contains(&tail.as_str()) {
                    let head = words[..words.len() - take].join(" ");
                    return (head, Some(tail));
                }
            }
        }
        (desc.to_string(), None)
    }
}

impl Default for AxisFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl StatementFormat for AxisFormat {
    fn name(&self) -> &'static str {
        "axis"
    }

    fn matches(&self, text: &str) -> bool {
        let upper = text.to_uppercase();
        upper.contains("TRANSACTION DETAILS")
            && (upper.contains("MERCHANT CATEGORY") || upper.contains("AXIS BANK"))
    }

    fn parse(&self, text: &str) -> Vec<RawLineItem> {
        let mut items = Vec::new();

        for line in text.lines() {
            if is_footer_row(line) {
                continue;
            }
            let Some(caps) = self.line.captures(line.trim()) else {
                continue;
            };

            let Ok(date) = parse_date(&caps["date"]) else {
                continue;
            };
            let Ok(amount) = parse_amount(&caps["amount"]) else {
                continue;
            };
            if amount == 0.0 {
                continue;
            }
            let is_credit = caps
                .name("suffix")
                .map(|m| detect_credit(m.as_str()))
                .unwrap_or(false);

            let (desc, bank_category) = Self::split_category(&clean_description(&caps["desc"]));

            items.push(RawLineItem {
                date,
                description: desc,
                amount,
                is_credit,
                bank_category,
            });
        }

        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const SAMPLE: &str = "\
AXIS BANK Credit Card Statement
DATE TRANSACTION DETAILS MERCHANT CATEGORY AMOUNT (Rs.)
15-01-2024 BIGBASKET BANGALORE GROCERIES 1,200.00 Dr
16-01-2024 INDIGO 6E2341 DEL-BLR AIRLINES 5,400.00 Dr
20-01-2024 PAYMENT RECEIVED 6,000.00 Cr
Total Amount Due 600.00";

    #[test]
    fn test_matches_header() {
        let fmt = AxisFormat::new();
        assert!(fmt.matches(SAMPLE));
        assert!(!fmt.matches("15/01/2024| 19:32 SWIGGY 450.00"));
    }

    #[test]
    fn test_parse_with_merchant_category() {
        let fmt = AxisFormat::new();
        let items = fmt.parse(SAMPLE);
        assert_eq!(items.len(), 3);

        assert_eq!(items[0].description, "BIGBASKET BANGALORE");
        assert_eq!(items[0].bank_category.as_deref(), Some("GROCERIES"));
        assert_eq!(items[0].amount, 1200.00);
        assert!(!items[0].is_credit);
        assert_eq!(items[0].date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());

        assert_eq!(items[1].bank_category.as_deref(), Some("AIRLINES"));

        assert!(items[2].is_credit);
        assert_eq!(items[2].bank_category, None);
    }

    #[test]
    fn test_split_two_word_category() {
        let (desc, cat) = AxisFormat::split_category("SHOPPERS STOP MUMBAI DEPARTMENT STORES");
        assert_eq!(desc, "SHOPPERS STOP MUMBAI");
        assert_eq!(cat.as_deref(), Some("DEPARTMENT STORES"));
    }
}
