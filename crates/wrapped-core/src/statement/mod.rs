//! Statement PDF parsing
//!
//! Extraction happens in two stages: the PDF is flattened to text (handling
//! password-protected files, which Indian banks send by default), then a
//! bank-specific [`StatementFormat`] turns the text into raw line items.
//! New bank layouts plug in by implementing the trait.

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::{Bank, RawLineItem};

mod axis;
mod generic;
mod hdfc;
pub mod text;

pub use axis::AxisFormat;
pub use generic::GenericFormat;
pub use hdfc::HdfcFormat;

/// A bank statement layout
pub trait StatementFormat: Send + Sync {
    /// Short identifier, e.g. "hdfc"
    fn name(&self) -> &'static str;

    /// Whether the extracted text looks like this layout
    fn matches(&self, text: &str) -> bool;

    /// Extract raw line items from the text. Unparseable lines are skipped;
    /// an empty result means the layout did not apply after all.
    fn parse(&self, text: &str) -> Vec<RawLineItem>;
}

/// All known formats, most specific first
fn all_formats() -> Vec<Box<dyn StatementFormat>> {
    vec![
        Box::new(HdfcFormat::new()),
        Box::new(AxisFormat::new()),
        Box::new(GenericFormat::new()),
    ]
}

/// The format a card's bank prefers, if it has one
fn preferred_format(bank: Bank) -> Option<Box<dyn StatementFormat>> {
    match bank {
        Bank::Hdfc => Some(Box::new(HdfcFormat::new())),
        Bank::Axis => Some(Box::new(AxisFormat::new())),
        Bank::Other => None,
    }
}

/// Flatten a statement PDF to text
///
/// A missing password for an encrypted file and a wrong password both come
/// back as [`Error::Decryption`]; callers surface them per file.
pub fn extract_text(data: &[u8], password: Option<&str>) -> Result<String> {
    let doc = lopdf::Document::load_mem(data)
        .map_err(|e| Error::UnrecognizedFormat(format!("Not a valid PDF: {}", e)))?;

    if doc.is_encrypted() {
        let Some(password) = password else {
            return Err(Error::Decryption(
                "statement is password-protected and no password was supplied".to_string(),
            ));
        };
        pdf_extract::extract_text_from_mem_encrypted(data, password)
            .map_err(|e| Error::Decryption(format!("could not decrypt statement: {}", e)))
    } else {
        pdf_extract::extract_text_from_mem(data)
            .map_err(|e| Error::UnrecognizedFormat(format!("could not extract text: {}", e)))
    }
}

/// Parse a statement PDF into raw line items
///
/// The card's bank selects the preferred layout; when that yields nothing
/// (or the bank is `Other`) each known layout is tried in turn.
pub fn parse_statement(data: &[u8], password: Option<&str>, bank: Bank) -> Result<Vec<RawLineItem>> {
    let text = extract_text(data, password)?;
    parse_text(&text, bank)
}

/// Format selection and parsing, separated from PDF extraction for testing
pub fn parse_text(text: &str, bank: Bank) -> Result<Vec<RawLineItem>> {
    if let Some(format) = preferred_format(bank) {
        if format.matches(text) {
            let items = format.parse(text);
            if !items.is_empty() {
                debug!(format = format.name(), count = items.len(), "parsed statement");
                return Ok(items);
            }
        }
        warn!(
            format = format.name(),
            "preferred format did not apply, falling back to auto-detection"
        );
    }

    for format in all_formats() {
        if format.matches(text) {
            let items = format.parse(text);
            if !items.is_empty() {
                debug!(format = format.name(), count = items.len(), "parsed statement");
                return Ok(items);
            }
        }
    }

    Err(Error::UnrecognizedFormat(
        "no transactions found in statement".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    /// One-page PDF with the given text lines, built in memory
    fn pdf_with_lines(lines: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("TL", vec![14.into()]),
            Operation::new("Td", vec![40.into(), 750.into()]),
        ];
        for line in lines {
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
            operations.push(Operation::new("T*", vec![]));
        }
        operations.push(Operation::new("ET", vec![]));

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );
        let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    /// PDF whose trailer carries a standard-security Encrypt dictionary, so
    /// it reads as password-protected without any password unlocking it
    fn password_protected_pdf() -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let page_id = doc.add_object(dictionary! { "Type" => "Page", "Parent" => pages_id });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );
        let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
        doc.trailer.set("Root", catalog_id);

        let encrypt_id = doc.add_object(dictionary! {
            "Filter" => "Standard",
            "V" => 1,
            "R" => 2,
            "O" => Object::string_literal("0123456789abcdef0123456789abcdef"),
            "U" => Object::string_literal("0123456789abcdef0123456789abcdef"),
            "P" => -44,
        });
        doc.trailer.set("Encrypt", encrypt_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    const HDFC_TEXT: &str = "\
HDFC Bank Credit Card Statement
15/01/2024| 19:32 SWIGGY BANGALORE 450.00
16/01/2024| 08:10 CASHBACK EARNED + C 50.00";

    const AXIS_TEXT: &str = "\
DATE TRANSACTION DETAILS MERCHANT CATEGORY AMOUNT (Rs.)
15-01-2024 BIGBASKET BANGALORE GROCERIES 1,200.00 Dr";

    #[test]
    fn test_bank_hint_selects_format() {
        let items = parse_text(HDFC_TEXT, Bank::Hdfc).unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_auto_detection_for_other_bank() {
        let items = parse_text(AXIS_TEXT, Bank::Other).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].bank_category.as_deref(), Some("GROCERIES"));
    }

    #[test]
    fn test_wrong_hint_falls_back() {
        // HDFC hint against an Axis statement still parses via auto-detection
        let items = parse_text(AXIS_TEXT, Bank::Hdfc).unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_no_transactions_is_an_error() {
        let err = parse_text("Dear customer, see attached.", Bank::Other).unwrap_err();
        assert!(matches!(err, Error::UnrecognizedFormat(_)));
    }

    #[test]
    fn test_not_a_pdf() {
        let err = extract_text(b"plain text, not a pdf", None).unwrap_err();
        assert!(matches!(err, Error::UnrecognizedFormat(_)));
    }

    #[test]
    fn test_parse_statement_from_pdf_bytes() {
        let bytes = pdf_with_lines(&[
            "15/01/2024| 19:32 SWIGGY BANGALORE 450.00",
            "16/01/2024| 08:10 CASHBACK EARNED + C 50.00",
        ]);
        let items = parse_statement(&bytes, None, Bank::Hdfc).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].description, "SWIGGY BANGALORE");
        assert!(items[1].is_credit);
    }

    #[test]
    fn test_encrypted_statement_requires_password() {
        let err = extract_text(&password_protected_pdf(), None).unwrap_err();
        assert!(matches!(err, Error::Decryption(_)));
        assert!(err.to_string().contains("password"));
    }

    #[test]
    fn test_encrypted_statement_rejects_wrong_password() {
        let err = extract_text(&password_protected_pdf(), Some("wrong")).unwrap_err();
        assert!(matches!(err, Error::Decryption(_)));
    }
}
