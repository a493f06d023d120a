//! CSV loader for a book of business.
//!
//! ## CSV Format
//!
//! One row per book tier. Column order does **not** matter (headers are
//! matched by name); header names are case-sensitive.
//!
//! | Column   | Required | Notes                                            |
//! |----------|----------|--------------------------------------------------|
//! | `label`  | yes      | Empty cell becomes `Book N` (N = 1-based row)    |
//! | `amount` | yes      | Annualized book amount; `$` and `,` are ignored  |
//! | `pct`    | yes      | Commission rate on a 0–100 scale                 |
//!
//! Numeric cells go through the same coercion as typed input, so a
//! malformed cell reads as `0` rather than failing the import. The file
//! must hold between one and five rows.
//!
//! ### Example
//!
//! ```csv
//! label,amount,pct
//! Group Health,"$250,000",5
//! Dental,80000,7.5
//! ```
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use roi_core::calculations::coerce::coerce;
use roi_core::{MAX_TIERS, RawInput, Tier};

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    label: String,
    amount: String,
    pct: String,
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading a book from CSV.
#[derive(Debug, thiserror::Error)]
pub enum BookLoadError {
    /// The file could not be read.
    #[error("cannot read book file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The underlying CSV deserialisation failed (bad structure, missing
    /// column, wrong column count, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// The file held a header but no data rows.
    #[error("book file has no rows")]
    Empty,

    /// More rows than a book may hold.
    #[error("book file has {0} rows; at most {MAX_TIERS} are allowed")]
    TooManyRows(usize),
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

/// Convert a single CSV row into a Tier.
///
/// row_number is 1-based and doubles as the default label number.
fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Tier {
    let label = if row.label.is_empty() {
        format!("Book {row_number}")
    } else {
        row.label
    };

    Tier {
        label,
        amount: coerce(RawInput::Text(&row.amount)),
        pct: coerce(RawInput::Text(&row.pct)),
    }
}

/// Parse CSV text and return the tiers in file order.
///
/// # Errors
///
/// * [BookLoadError::Parse] – the CSV is structurally invalid.
/// * [BookLoadError::Empty] – no data rows.
/// * [BookLoadError::TooManyRows] – more than five data rows.
pub fn load_from_str(input: &str) -> Result<Vec<Tier>, BookLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    let tiers = reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| Ok(convert_row(result?, idx + 1)))
        .collect::<Result<Vec<_>, BookLoadError>>()?;

    match tiers.len() {
        0 => Err(BookLoadError::Empty),
        n if n > MAX_TIERS => Err(BookLoadError::TooManyRows(n)),
        _ => Ok(tiers),
    }
}

/// Read a file from disk and delegate to [load_from_str].
pub fn load_from_file(path: &Path) -> Result<Vec<Tier>, BookLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| BookLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let tiers = load_from_str(&contents)?;
    info!(path = %path.display(), tiers = tiers.len(), "loaded book of business");
    Ok(tiers)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use roi_core::FieldValue;
    use rust_decimal_macros::dec;

    const TWO_ROW_CSV: &str = "\
label,amount,pct
Group Health,250000,5
Dental,80000,7.5
";

    // -----------------------------------------------------------------------
    // 1. Well-formed rows
    // -----------------------------------------------------------------------
    #[test]
    fn test_rows_parse_in_file_order() {
        let tiers = load_from_str(TWO_ROW_CSV).expect("should parse");

        assert_eq!(tiers.len(), 2);
        assert_eq!(tiers[0].label, "Group Health");
        assert_eq!(tiers[0].amount, FieldValue::Number(dec!(250000)));
        assert_eq!(tiers[1].label, "Dental");
        assert_eq!(tiers[1].pct, FieldValue::Number(dec!(7.5)));
    }

    #[test]
    fn test_column_order_does_not_matter() {
        let csv = "pct,label,amount\n5,Book A,100000\n";
        let tiers = load_from_str(csv).expect("column order should not matter");

        assert_eq!(tiers[0].label, "Book A");
        assert_eq!(tiers[0].amount, FieldValue::Number(dec!(100000)));
        assert_eq!(tiers[0].pct, FieldValue::Number(dec!(5)));
    }

    #[test]
    fn test_whitespace_around_values_is_trimmed() {
        let csv = "label , amount , pct\n  Vision , 1000 , 2 \n";
        let tiers = load_from_str(csv).expect("should tolerate whitespace");

        assert_eq!(tiers[0].label, "Vision");
        assert_eq!(tiers[0].amount, FieldValue::Number(dec!(1000)));
    }

    // -----------------------------------------------------------------------
    // 2. Coercion of numeric cells
    // -----------------------------------------------------------------------
    #[test]
    fn test_currency_formatting_is_stripped() {
        let csv = "label,amount,pct\nBook 1,\"$1,250,000\",5%\n";
        let tiers = load_from_str(csv).expect("should parse");

        assert_eq!(tiers[0].amount, FieldValue::Number(dec!(1250000)));
        assert_eq!(tiers[0].pct, FieldValue::Number(dec!(5)));
    }

    #[test]
    fn test_empty_numeric_cell_stays_empty() {
        let csv = "label,amount,pct\nBook 1,,5\n";
        let tiers = load_from_str(csv).expect("should parse");

        assert_eq!(tiers[0].amount, FieldValue::Empty);
        assert_eq!(tiers[0].commission(), dec!(0));
    }

    #[test]
    fn test_malformed_numeric_cell_reads_as_zero() {
        let csv = "label,amount,pct\nBook 1,1.2.3,abc\n";
        let tiers = load_from_str(csv).expect("should parse");

        assert_eq!(tiers[0].amount, FieldValue::Number(dec!(0)));
        assert_eq!(tiers[0].pct, FieldValue::Number(dec!(0)));
    }

    // -----------------------------------------------------------------------
    // 3. Default labels
    // -----------------------------------------------------------------------
    #[test]
    fn test_empty_label_is_numbered_by_row() {
        let csv = "label,amount,pct\nFirst,1,1\n,2,2\n";
        let tiers = load_from_str(csv).expect("should parse");

        assert_eq!(tiers[1].label, "Book 2");
    }

    // -----------------------------------------------------------------------
    // 4. Row count limits
    // -----------------------------------------------------------------------
    #[test]
    fn test_header_only_is_an_error() {
        let result = load_from_str("label,amount,pct\n");

        assert!(matches!(result, Err(BookLoadError::Empty)));
    }

    #[test]
    fn test_completely_empty_string_is_an_error() {
        assert!(matches!(load_from_str(""), Err(BookLoadError::Empty)));
    }

    #[test]
    fn test_five_rows_is_accepted() {
        let csv = "label,amount,pct\na,1,1\nb,1,1\nc,1,1\nd,1,1\ne,1,1\n";

        assert_eq!(load_from_str(csv).unwrap().len(), 5);
    }

    #[test]
    fn test_six_rows_is_rejected() {
        let csv = "label,amount,pct\na,1,1\nb,1,1\nc,1,1\nd,1,1\ne,1,1\nf,1,1\n";

        match load_from_str(csv) {
            Err(BookLoadError::TooManyRows(n)) => assert_eq!(n, 6),
            other => panic!("expected TooManyRows, got {other:?}"),
        }
    }

    // -----------------------------------------------------------------------
    // 5. Structural errors
    // -----------------------------------------------------------------------
    #[test]
    fn test_missing_column_returns_parse_error() {
        let result = load_from_str("label,amount\nBook 1,1000\n");

        assert!(matches!(result, Err(BookLoadError::Parse(_))));
    }

    #[test]
    fn test_ragged_row_returns_parse_error() {
        let result = load_from_str("label,amount,pct\nBook 1,1000\n");

        assert!(matches!(result, Err(BookLoadError::Parse(_))));
    }
}
