//! Shared text helpers for statement line parsing

use chrono::NaiveDate;

use crate::error::{Error, Result};

/// Parse a date string in the formats Indian card statements use
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();

    let formats = [
        "%d/%m/%Y", // 15/01/2024
        "%d-%m-%Y", // 15-01-2024
        "%d.%m.%Y", // 15.01.2024
        "%d/%m/%y", // 15/01/24
        "%d-%m-%y", // 15-01-24
        "%d.%m.%y", // 15.01.24
    ];

    for fmt in formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date);
        }
    }

    Err(Error::InvalidData(format!("Unable to parse date: {}", s)))
}

/// Parse an amount string, handling rupee symbols, commas and Cr/Dr suffixes
///
/// Returns the magnitude; direction is decided separately by [`detect_credit`].
pub fn parse_amount(s: &str) -> Result<f64> {
    let cleaned: String = s
        .trim()
        .trim_start_matches('₹')
        .trim_start_matches("Rs.")
        .trim_start_matches("Rs")
        .trim_end_matches("Cr")
        .trim_end_matches("CR")
        .trim_end_matches("Dr")
        .trim_end_matches("DR")
        .replace([',', ' ', '+'], "");

    cleaned
        .trim()
        .parse::<f64>()
        .map(f64::abs)
        .map_err(|_| Error::InvalidData(format!("Unable to parse amount: {}", s)))
}

/// Collapse whitespace runs and strip the edges of a description
pub fn clean_description(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whether a suffix after the amount column marks the row as a credit
///
/// Banks use "Cr", "CR", "C" or a bare "+"; anything else (including the
/// explicit "Dr" forms) is a debit.
pub fn detect_credit(suffix: &str) -> bool {
    matches!(suffix.trim(), "Cr" | "CR" | "cr" | "C" | "+" | "+ C")
}

/// Filter out statement furniture that matches transaction-line patterns
/// but is not a transaction (totals, balances, page footers)
pub fn is_footer_row(line: &str) -> bool {
    let upper = line.to_uppercase();
    const FOOTER_MARKERS: &[&str] = &[
        "OPENING BALANCE",
        "CLOSING BALANCE",
        "TOTAL DUES",
        "TOTAL AMOUNT DUE",
        "MINIMUM AMOUNT DUE",
        "PAYMENT DUE DATE",
        "CREDIT LIMIT",
        "AVAILABLE CASH",
        "STATEMENT PERIOD",
        "STATEMENT DATE",
        "REWARD POINTS SUMMARY",
        "PAGE ",
        "CONTINUED ON NEXT",
    ];
    FOOTER_MARKERS.iter().any(|m| upper.contains(m))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(parse_date("15/01/2024").unwrap(), expected);
        assert_eq!(parse_date("15-01-2024").unwrap(), expected);
        assert_eq!(parse_date("15.01.2024").unwrap(), expected);
        assert_eq!(parse_date("15/01/24").unwrap(), expected);
        assert!(parse_date("2024/01/15").is_err());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1,234.56").unwrap(), 1234.56);
        assert_eq!(parse_amount("₹1,234.56").unwrap(), 1234.56);
        assert_eq!(parse_amount("Rs. 500.00").unwrap(), 500.00);
        assert_eq!(parse_amount("250.00 Cr").unwrap(), 250.00);
        // Magnitude only
        assert_eq!(parse_amount("-99.00").unwrap(), 99.00);
        assert!(parse_amount("N/A").is_err());
    }

    #[test]
    fn test_clean_description() {
        assert_eq!(
            clean_description("  SWIGGY   BANGALORE \t IN  "),
            "SWIGGY BANGALORE IN"
        );
    }

    #[test]
    fn test_detect_credit() {
        assert!(detect_credit("Cr"));
        assert!(detect_credit("CR"));
        assert!(detect_credit("+"));
        assert!(!detect_credit("Dr"));
        assert!(!detect_credit(""));
    }

    #[test]
    fn test_is_footer_row() {
        assert!(is_footer_row("Opening Balance 12,000.00"));
        assert!(is_footer_row("TOTAL AMOUNT DUE 4,500.00"));
        assert!(is_footer_row("Page 1 of 3"));
        assert!(!is_footer_row("SWIGGY BANGALORE 450.00"));
    }
}
