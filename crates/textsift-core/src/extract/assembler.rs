//! Record assembly: runs the four extractors over one document's text and
//! shapes their findings into the fixed-column output record.

use tracing::debug;

use super::amounts::extract_amounts;
use super::collapse_whitespace;
use super::dates::extract_dates;
use super::invoice_no::extract_invoice_number;
use super::vendor::extract_vendor;
use crate::models::config::ExtractionConfig;
use crate::models::record::ExtractionRecord;

/// Build the full record for one document.
///
/// The extractors run independently over the same text; none of them can
/// fail, so the only error path here is input text that is effectively
/// empty. That case yields a record with the error column set and every
/// extraction field blank, keeping the output shape uniform.
pub fn assemble_record(filename: &str, text: &str, config: &ExtractionConfig) -> ExtractionRecord {
    if text.trim().is_empty() {
        return ExtractionRecord::with_error(filename, "Empty file");
    }

    let mut record = ExtractionRecord::new(filename);
    record.text_excerpt = build_excerpt(text, config.max_excerpt_length);

    let dates = extract_dates(text, config.max_dates_per_record);
    record.date_count = dates.len();
    if let Some(primary) = dates.first() {
        record.date_primary_mmddyyyy = primary.mmddyyyy();
    }

    let slots = [
        (
            &mut record.date1_mmddyyyy,
            &mut record.date1_label,
            &mut record.date1_snippet,
        ),
        (
            &mut record.date2_mmddyyyy,
            &mut record.date2_label,
            &mut record.date2_snippet,
        ),
        (
            &mut record.date3_mmddyyyy,
            &mut record.date3_label,
            &mut record.date3_snippet,
        ),
    ];
    for (finding, (date, label, snippet)) in dates.iter().zip(slots) {
        *date = finding.mmddyyyy();
        *label = finding.label.as_str().to_string();
        *snippet = finding.snippet.clone();
    }

    record.possible_vendor = extract_vendor(text);
    record.invoice_no = extract_invoice_number(text);

    let amounts = extract_amounts(text);
    record.total = amounts.total;
    record.other_amounts = amounts.other_amounts;

    debug!(
        filename,
        dates = record.date_count,
        vendor = %record.possible_vendor,
        "assembled record"
    );
    record
}

/// Whitespace-collapsed, length-bounded preview of the document text.
pub fn build_excerpt(text: &str, max_length: usize) -> String {
    let cleaned = collapse_whitespace(text);
    if cleaned.chars().count() <= max_length {
        return cleaned;
    }

    let truncated: String = cleaned.chars().take(max_length).collect();
    format!("{truncated}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config() -> ExtractionConfig {
        ExtractionConfig::default()
    }

    const SAMPLE: &str = "\
Acme Corporation
123 Main Street

Invoice #: INV-2024-001
Invoice Date: 01/15/2024
Due Date: 02/15/2024

Subtotal: $100.00
Tax: $20.00
Total: $120.00
";

    #[test]
    fn test_full_record() {
        let record = assemble_record("sample.txt", SAMPLE, &config());

        assert_eq!(record.filename, "sample.txt");
        assert_eq!(record.date_primary_mmddyyyy, "01/15/2024");
        assert_eq!(record.date1_mmddyyyy, "01/15/2024");
        assert_eq!(record.date1_label, "invoice");
        assert_eq!(record.date2_mmddyyyy, "02/15/2024");
        assert_eq!(record.date2_label, "due");
        assert_eq!(record.possible_vendor, "Acme Corporation");
        assert_eq!(record.invoice_no, "INV-2024-001");
        assert_eq!(record.total, "$120.00");
        assert!(record.other_amounts.contains("$100.00"));
        assert!(record.errors.is_empty());
    }

    #[test]
    fn test_idempotent() {
        let first = assemble_record("sample.txt", SAMPLE, &config());
        let second = assemble_record("sample.txt", SAMPLE, &config());
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_text_yields_error_record() {
        let record = assemble_record("empty.txt", "   \n\t ", &config());

        assert_eq!(record.filename, "empty.txt");
        assert!(!record.errors.is_empty());
        assert!(record.text_excerpt.is_empty());
        assert!(record.possible_vendor.is_empty());
        assert_eq!(record.date_count, 0);
    }

    #[test]
    fn test_excerpt_truncation() {
        // 600 visible characters collapse to themselves and truncate to
        // 500 plus the ellipsis.
        let text = "ab ".repeat(200); // 600 chars collapsed ("ab " x 200 trimmed = 599)
        let record = assemble_record("long.txt", &text, &config());

        assert!(record.text_excerpt.chars().count() <= 503);

        let exact = "x".repeat(600);
        let excerpt = build_excerpt(&exact, 500);
        assert_eq!(excerpt.chars().count(), 503);
        assert!(excerpt.ends_with("..."));
    }

    #[test]
    fn test_short_text_not_truncated() {
        assert_eq!(build_excerpt("  hello   world  ", 500), "hello world");
    }

    #[test]
    fn test_record_always_has_full_shape() {
        let record = assemble_record("sparse.txt", "nothing interesting", &config());
        let fields = record.csv_fields();

        assert_eq!(fields.len(), 18);
        assert_eq!(fields[0], "sparse.txt");
        // Extraction fields are simply empty, not errors.
        assert!(record.errors.is_empty());
    }
}
