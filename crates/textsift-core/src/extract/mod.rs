//! Rule-based field extractors and record assembly.
//!
//! The four extractors are independent, stateless functions over the
//! document text; they share only the pattern tables in [`patterns`] and
//! the snippet helpers below.

pub mod amounts;
pub mod assembler;
pub mod dates;
pub mod invoice_no;
pub mod patterns;
pub mod vendor;

pub use amounts::{extract_amounts, ExtractedAmounts};
pub use assembler::assemble_record;
pub use dates::{extract_dates, DateFinding};
pub use invoice_no::extract_invoice_number;
pub use vendor::extract_vendor;

/// Collapse all runs of whitespace to single spaces and trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A whitespace-collapsed window of `radius` bytes around a match span,
/// clamped to character boundaries.
pub(crate) fn context_snippet(text: &str, start: usize, end: usize, radius: usize) -> String {
    let from = floor_char_boundary(text, start.saturating_sub(radius));
    let to = floor_char_boundary(text, end.saturating_add(radius));
    collapse_whitespace(&text[from..to])
}

fn floor_char_boundary(text: &str, index: usize) -> usize {
    let mut i = index.min(text.len());
    while i > 0 && !text.is_char_boundary(i) {
        i -= 1;
    }
    i
}
