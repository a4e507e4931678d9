//! Aggregate performance-guarantee block
//!
//! One numbered line per firm registered against a work:
//!
//! ```text
//! 1. Alpha Works, submitted PG No. PG/17, Dated 02-05-2024 amount Rs. 1,25,000.00, bank: SBI, Main Road.
//! 2. Beta Infra did not submit the PG.
//! ```
//!
//! A firm with no paperwork row renders the same as one that explicitly
//! did not submit.

use std::collections::HashMap;

use docgen_types::FirmDocument;

use crate::money::format_inr;

/// Render the block for `firm_names` (registration order) from whatever
/// paperwork rows exist.
pub fn format_all(documents: &[FirmDocument], firm_names: &[String], date_format: &str) -> String {
    let by_firm: HashMap<&str, &FirmDocument> = documents
        .iter()
        .map(|d| (d.firm_name.as_str(), d))
        .collect();

    firm_names
        .iter()
        .enumerate()
        .map(|(i, firm)| format_line(i + 1, firm, by_firm.get(firm.as_str()).copied(), date_format))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One numbered line
pub fn format_line(
    number: usize,
    firm_name: &str,
    document: Option<&FirmDocument>,
    date_format: &str,
) -> String {
    match document.filter(|d| d.pg_submitted) {
        Some(doc) => format!(
            "{number}. {firm_name}, submitted PG No. {}, Dated {} amount Rs. {}, bank: {}, {}.",
            doc.pg_no.as_deref().unwrap_or_default(),
            doc.pg_submission_date
                .map(|d| d.format(date_format).to_string())
                .unwrap_or_default(),
            doc.pg_amount.map(format_inr).unwrap_or_default(),
            doc.pg_bank_name.as_deref().unwrap_or_default(),
            doc.pg_bank_address.as_deref().unwrap_or_default(),
        ),
        None => format!("{number}. {firm_name} did not submit the PG."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn submitted(firm: &str) -> FirmDocument {
        FirmDocument {
            pg_no: Some("PG/17".into()),
            pg_amount: Some(Decimal::new(12500000, 2)),
            pg_bank_name: Some("SBI".into()),
            pg_bank_address: Some("Main Road".into()),
            pg_submission_date: NaiveDate::from_ymd_opt(2024, 5, 2),
            pg_submitted: true,
            ..FirmDocument::new(1, 9, firm)
        }
    }

    #[test]
    fn test_one_line_per_registered_firm() {
        let firms = vec!["A".to_string(), "B".to_string()];
        let block = format_all(&[submitted("A")], &firms, "%d-%m-%Y");
        let lines: Vec<&str> = block.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "1. A, submitted PG No. PG/17, Dated 02-05-2024 amount Rs. 1,25,000.00, bank: SBI, Main Road."
        );
        assert_eq!(lines[1], "2. B did not submit the PG.");
    }

    #[test]
    fn test_explicit_non_submission_matches_missing_row() {
        let mut declined = submitted("B");
        declined.pg_submitted = false;
        let firms = vec!["B".to_string()];

        assert_eq!(
            format_all(&[declined], &firms, "%d-%m-%Y"),
            format_all(&[], &firms, "%d-%m-%Y")
        );
    }

    #[test]
    fn test_documents_for_unregistered_firms_are_ignored() {
        let firms = vec!["B".to_string()];
        let block = format_all(&[submitted("A")], &firms, "%d-%m-%Y");
        assert_eq!(block, "1. B did not submit the PG.");
    }

    #[test]
    fn test_no_firms_renders_empty() {
        assert_eq!(format_all(&[submitted("A")], &[], "%d-%m-%Y"), "");
    }
}
