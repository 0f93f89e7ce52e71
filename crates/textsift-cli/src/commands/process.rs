//! Process command - extract data from a single text file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use textsift_core::{assemble_record, read_document, ExtractionRecord, TextsiftConfig};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input text file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Load configuration
    let config = match config_path {
        Some(path) => TextsiftConfig::from_file(Path::new(path))?,
        None => TextsiftConfig::default(),
    };

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let text = read_document(&args.input, config.processing.max_file_size_mb)?;
    let filename = args
        .input
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("document");

    let record = assemble_record(filename, &text, &config.extraction);

    let output = format_record(&record, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

pub fn format_record(record: &ExtractionRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

fn format_csv(record: &ExtractionRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(ExtractionRecord::CSV_HEADER)?;
    wtr.write_record(record.csv_fields())?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &ExtractionRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!("File: {}\n", record.filename));
    output.push('\n');

    if !record.possible_vendor.is_empty() {
        output.push_str(&format!("Vendor:  {}\n", record.possible_vendor));
    }
    if !record.invoice_no.is_empty() {
        output.push_str(&format!("Invoice: {}\n", record.invoice_no));
    }

    if record.date_count > 0 {
        output.push_str(&format!("Dates ({}):\n", record.date_count));
        let dates = [
            (&record.date1_mmddyyyy, &record.date1_label),
            (&record.date2_mmddyyyy, &record.date2_label),
            (&record.date3_mmddyyyy, &record.date3_label),
        ];
        for (date, label) in dates {
            if !date.is_empty() {
                output.push_str(&format!("  {date} ({label})\n"));
            }
        }
    }

    if !record.total.is_empty() {
        output.push_str(&format!("Total:   {}\n", record.total));
    }
    if !record.other_amounts.is_empty() {
        output.push_str(&format!("Other amounts: {}\n", record.other_amounts));
    }

    if !record.errors.is_empty() {
        output.push_str(&format!("Errors:  {}\n", record.errors));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_output_has_header_and_one_row() {
        let record = ExtractionRecord::new("a.txt");
        let csv = format_csv(&record).unwrap();

        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("filename,"));
        assert!(lines[1].starts_with("a.txt,"));
    }

    #[test]
    fn test_text_output_skips_empty_fields() {
        let record = ExtractionRecord::new("a.txt");
        let text = format_text(&record);

        assert!(text.contains("File: a.txt"));
        assert!(!text.contains("Vendor:"));
        assert!(!text.contains("Total:"));
    }
}
