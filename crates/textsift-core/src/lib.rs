//! Core library for heuristic field extraction from plain-text documents.
//!
//! This crate provides:
//! - Rule-based extractors for dates, vendor names, invoice numbers, and
//!   currency amounts
//! - Record assembly into a fixed-shape, per-document output row
//! - Document reading with ordered encoding fallbacks and enumeration helpers

pub mod error;
pub mod extract;
pub mod input;
pub mod models;

pub use error::{InputError, Result, TextsiftError};
pub use extract::assembler::assemble_record;
pub use extract::{
    amounts::{extract_amounts, ExtractedAmounts},
    dates::{extract_dates, DateFinding},
    invoice_no::extract_invoice_number,
    vendor::extract_vendor,
};
pub use input::{list_text_files, read_document};
pub use models::config::TextsiftConfig;
pub use models::record::{Confidence, DateLabel, ExtractionRecord};
