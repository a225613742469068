//! HDFC Bank credit card statement format

use regex::Regex;

use crate::models::RawLineItem;

use super::text::{clean_description, is_footer_row, parse_amount, parse_date};
use super::StatementFormat;

/// HDFC statements render each transaction as a single pipe-delimited line:
/// `DD/MM/YYYY| HH:MM DESCRIPTION AMOUNT` with an optional trailing marker.
/// Credits carry a `+ C` suffix on the description.
pub struct HdfcFormat {
    line: Regex,
    probe: Regex,
}

impl HdfcFormat {
    pub fn new() -> Self {
        Self {
            line: Regex::new(
                r"(?P<date>\d{2}/\d{2}/\d{4})\s*\|\s*(?P<time>\d{2}:\d{2})\s+(?P<desc>.*?)\s+(?P<amount>[\d,]+\.\d{2})\s*[A-Za-z]?$",
            )
            .expect("static pattern"),
            probe: Regex::new(r"\d{2}/\d{2}/\d{4}\s*\|\s*\d{2}:\d{2}").expect("static pattern"),
        }
    }
}

impl Default for HdfcFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl StatementFormat for HdfcFormat {
    fn name(&self) -> &'static str {
        "hdfc"
    }

    fn matches(&self, text: &str) -> bool {
        text.lines().any(|line| self.probe.is_match(line))
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

            let mut desc = caps["desc"].trim().to_string();
            let mut is_credit = false;
            if let Some(stripped) = desc.strip_suffix("+ C") {
                is_credit = true;
                desc = stripped.trim_end().to_string();
            } else if let Some(stripped) = desc.strip_suffix(" C") {
                desc = stripped.trim_end().to_string();
            }

            let Ok(date) = parse_date(&caps["date"]) else {
                continue;
            };
            let Ok(amount) = parse_amount(&caps["amount"]) else {
                continue;
            };
            if amount == 0.0 {
                continue;
            }

            items.push(RawLineItem {
                date,
                description: clean_description(&desc),
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
    use chrono::NaiveDate;

    const SAMPLE: &str = "\
HDFC Bank Credit Card Statement
Statement Period 01/01/2024 to 31/01/2024
15/01/2024| 19:32 SWIGGY BANGALORE 450.00
16/01/2024| 08:10 CASHBACK EARNED + C 50.00
18/01/2024| 12:00 AMAZON RETAIL IN 2,499.00
Page 1 of 2";

    #[test]
    fn test_matches_pipe_delimited_lines() {
        let fmt = HdfcFormat::new();
        assert!(fmt.matches(SAMPLE));
        assert!(!fmt.matches("DATE TRANSACTION DETAILS AMOUNT"));
    }

    #[test]
    fn test_parse_debits_and_credit_suffix() {
        let fmt = HdfcFormat::new();
        let items = fmt.parse(SAMPLE);
        assert_eq!(items.len(), 3);

        assert_eq!(items[0].description, "SWIGGY BANGALORE");
        assert_eq!(items[0].amount, 450.00);
        assert!(!items[0].is_credit);
        assert_eq!(items[0].date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());

        assert_eq!(items[1].description, "CASHBACK EARNED");
        assert!(items[1].is_credit);

        assert_eq!(items[2].amount, 2499.00);
    }

    #[test]
    fn test_skips_footer_lines() {
        let fmt = HdfcFormat::new();
        let text = "15/01/2024| 10:00 TOTAL AMOUNT DUE 4,500.00\n15/01/2024| 10:01 SWIGGY 100.00";
        let items = fmt.parse(text);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].description, "SWIGGY");
    }
}
