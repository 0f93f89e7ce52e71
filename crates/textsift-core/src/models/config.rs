//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the textsift pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TextsiftConfig {
    /// Input/output locations.
    pub io: IoConfig,

    /// Extraction thresholds.
    pub extraction: ExtractionConfig,

    /// Batch processing settings.
    pub processing: ProcessingConfig,
}

/// Input/output locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IoConfig {
    /// Directory scanned for `.txt` documents.
    pub input_dir: PathBuf,

    /// Default output file for batch CSV results.
    pub output_file: PathBuf,

    /// Directory for log files. When set, the CLI writes its log there in
    /// addition to stderr.
    pub log_dir: Option<PathBuf>,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("data/input"),
            output_file: PathBuf::from("data/output/extracted_data.csv"),
            log_dir: None,
        }
    }
}

/// Extraction thresholds.
///
/// These parameterize truncation and validation limits only; the pattern
/// tables themselves are fixed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Maximum length of the text excerpt column, in characters.
    pub max_excerpt_length: usize,

    /// Maximum number of ranked dates kept per record.
    pub max_dates_per_record: usize,

    /// Currency symbols recognized by the amount patterns.
    pub currency_symbols: Vec<String>,

    /// Minimum accepted vendor candidate length.
    pub min_vendor_length: usize,

    /// Maximum accepted vendor candidate length.
    pub max_vendor_length: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_excerpt_length: 500,
            max_dates_per_record: 3,
            currency_symbols: ["$", "€", "£", "¥", "₹"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            min_vendor_length: 3,
            max_vendor_length: 50,
        }
    }
}

/// Batch processing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Records buffered between CSV flushes.
    pub batch_size: usize,

    /// Maximum input file size in megabytes; larger files are recorded as
    /// input errors and skipped.
    pub max_file_size_mb: u64,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            batch_size: 100,
            max_file_size_mb: 10,
        }
    }
}

impl TextsiftConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
