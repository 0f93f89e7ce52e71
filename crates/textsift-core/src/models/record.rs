//! Output record model: one fixed-shape row per input document.

use serde::{Deserialize, Serialize};

/// Semantic category assigned to a date finding based on its surrounding
/// keyword. Ordering follows ranking priority: invoice dates outrank due
/// dates, which outrank order and ship dates; unlabeled dates rank last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateLabel {
    Invoice,
    Due,
    Order,
    Ship,
    Unknown,
}

impl DateLabel {
    /// Ranking priority (1 = highest).
    pub fn priority(self) -> u8 {
        match self {
            DateLabel::Invoice => 1,
            DateLabel::Due => 2,
            DateLabel::Order => 3,
            DateLabel::Ship => 4,
            DateLabel::Unknown => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DateLabel::Invoice => "invoice",
            DateLabel::Due => "due",
            DateLabel::Order => "order",
            DateLabel::Ship => "ship",
            DateLabel::Unknown => "unknown",
        }
    }
}

/// Confidence attached to a date finding: labeled matches are high,
/// generic date-shape matches are medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
}

/// One output record per input document.
///
/// All fields are always present (possibly empty) so every record
/// serializes to the same tabular shape regardless of extraction success.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionRecord {
    pub filename: String,
    pub text_excerpt: String,
    pub date_primary_mmddyyyy: String,
    pub date1_mmddyyyy: String,
    pub date1_label: String,
    pub date1_snippet: String,
    pub date2_mmddyyyy: String,
    pub date2_label: String,
    pub date2_snippet: String,
    pub date3_mmddyyyy: String,
    pub date3_label: String,
    pub date3_snippet: String,
    pub date_count: usize,
    pub possible_vendor: String,
    pub invoice_no: String,
    pub total: String,
    pub other_amounts: String,
    pub errors: String,
}

impl ExtractionRecord {
    /// Column order for tabular output. Consumers depend on this exact
    /// order; do not reorder.
    pub const CSV_HEADER: [&'static str; 18] = [
        "filename",
        "text_excerpt",
        "date_primary_mmddyyyy",
        "date1_mmddyyyy",
        "date1_label",
        "date1_snippet",
        "date2_mmddyyyy",
        "date2_label",
        "date2_snippet",
        "date3_mmddyyyy",
        "date3_label",
        "date3_snippet",
        "date_count",
        "possible_vendor",
        "invoice_no",
        "total",
        "other_amounts",
        "errors",
    ];

    /// Create a record with only the filename set.
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            ..Self::default()
        }
    }

    /// Create a record for a document that could not be processed: all
    /// extraction fields empty, the error column populated.
    pub fn with_error(filename: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            errors: error.into(),
            ..Self::default()
        }
    }

    /// Field values in [`Self::CSV_HEADER`] order.
    pub fn csv_fields(&self) -> [String; 18] {
        [
            self.filename.clone(),
            self.text_excerpt.clone(),
            self.date_primary_mmddyyyy.clone(),
            self.date1_mmddyyyy.clone(),
            self.date1_label.clone(),
            self.date1_snippet.clone(),
            self.date2_mmddyyyy.clone(),
            self.date2_label.clone(),
            self.date2_snippet.clone(),
            self.date3_mmddyyyy.clone(),
            self.date3_label.clone(),
            self.date3_snippet.clone(),
            self.date_count.to_string(),
            self.possible_vendor.clone(),
            self.invoice_no.clone(),
            self.total.clone(),
            self.other_amounts.clone(),
            self.errors.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_priority_order() {
        assert!(DateLabel::Invoice.priority() < DateLabel::Due.priority());
        assert!(DateLabel::Due.priority() < DateLabel::Order.priority());
        assert!(DateLabel::Order.priority() < DateLabel::Ship.priority());
        assert!(DateLabel::Ship.priority() < DateLabel::Unknown.priority());
    }

    #[test]
    fn test_error_record_shape() {
        let record = ExtractionRecord::with_error("bad.txt", "could not decode");
        let fields = record.csv_fields();

        assert_eq!(fields.len(), ExtractionRecord::CSV_HEADER.len());
        assert_eq!(fields[0], "bad.txt");
        assert_eq!(fields[17], "could not decode");
        // Everything in between is empty except date_count.
        assert!(fields[1..12].iter().all(|f| f.is_empty()));
        assert_eq!(fields[12], "0");
    }
}
