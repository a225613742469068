//! Fallback format for statements that match no bank-specific layout

use regex::Regex;

use crate::models::RawLineItem;

use super::text::{clean_description, detect_credit, is_footer_row, parse_amount, parse_date};
use super::StatementFormat;

/// Last-resort line scanner: any line that starts with a date and ends with
/// an amount (optionally suffixed Cr/Dr) is taken as a transaction.
pub struct GenericFormat {
    line: Regex,
}

impl GenericFormat {
    pub fn new() -> Self {
        Self {
            line: Regex::new(
                r"^(?P<date>\d{2}[-/.]\d{2}[-/.]\d{2,4})\s+(?P<desc>.+?)\s+(?P<amount>[\d,]+\.\d{2})\s*(?P<suffix>Cr|CR|Dr|DR)?$",
            )
            .expect("static pattern"),
        }
    }
}

impl Default for GenericFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl StatementFormat for GenericFormat {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn matches(&self, text: &str) -> bool {
        text.lines()
            .filter(|line| !is_footer_row(line))
            .any(|line| self.line.is_match(line.trim()))
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

            items.push(RawLineItem {
                date,
                description: clean_description(&caps["desc"]),
                amount,
                is_credit,
                bank_category: None,
            });
        }

        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_lines() {
        let fmt = GenericFormat::new();
        let text = "\
Some Bank Statement
15/01/2024 COFFEE HOUSE CHENNAI 320.00
17.01.2024 REFUND STORE 120.00 Cr
Closing Balance 5,000.00";

        let items = fmt.parse(text);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].description, "COFFEE HOUSE CHENNAI");
        assert!(!items[0].is_credit);
        assert!(items[1].is_credit);
    }

    #[test]
    fn test_no_match_without_amounts() {
        let fmt = GenericFormat::new();
        assert!(!fmt.matches("Dear customer, your statement is attached."));
    }
}
