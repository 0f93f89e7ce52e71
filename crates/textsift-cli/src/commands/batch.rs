//! Batch processing command: a directory (or glob) of text files in, one
//! CSV of fixed-shape records out.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use textsift_core::{
    assemble_record, list_text_files, read_document, ExtractionRecord, TextsiftConfig,
};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input directory or glob pattern (defaults to the configured input dir)
    input: Option<String>,

    /// Output CSV path (defaults to the configured output file)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Load configuration
    let config = match config_path {
        Some(path) => TextsiftConfig::from_file(Path::new(path))?,
        None => TextsiftConfig::default(),
    };

    let input = args
        .input
        .clone()
        .unwrap_or_else(|| config.io.input_dir.display().to_string());
    let files = collect_files(&input)?;

    if files.is_empty() {
        anyhow::bail!("No .txt files found for input: {}", input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| config.io.output_file.clone());
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut wtr = csv::Writer::from_path(&output_path)?;
    wtr.write_record(ExtractionRecord::CSV_HEADER)?;

    // One row per file, in enumeration order. Read failures become error
    // records rather than aborting the batch.
    let mut processed = 0usize;
    let mut failed = Vec::new();
    let flush_every = config.processing.batch_size.max(1);

    for path in &files {
        let filename = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("document");

        let record = match read_document(path, config.processing.max_file_size_mb) {
            Ok(text) => assemble_record(filename, &text, &config.extraction),
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                failed.push((path.clone(), e.to_string()));
                ExtractionRecord::with_error(filename, &e.to_string())
            }
        };

        wtr.write_record(record.csv_fields())?;
        processed += 1;

        if processed % flush_every == 0 {
            wtr.flush()?;
            debug!("flushed {} records", processed);
        }

        pb.inc(1);
    }

    wtr.flush()?;
    pb.finish_with_message("Complete");

    // Print summary
    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        processed,
        start.elapsed()
    );
    println!(
        "   {} extracted, {} failed to read",
        style(processed - failed.len()).green(),
        style(failed.len()).red()
    );
    println!(
        "{} Output written to {}",
        style("✓").green(),
        output_path.display()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for (path, error) in &failed {
            println!("  - {}: {}", path.display(), error);
        }
    }

    Ok(())
}

/// Resolve the input argument to a list of `.txt` files. A directory is
/// listed non-recursively and sorted; anything else is treated as a glob
/// pattern, preserving glob order.
fn collect_files(input: &str) -> anyhow::Result<Vec<PathBuf>> {
    let path = Path::new(input);
    if path.is_dir() {
        return Ok(list_text_files(path)?);
    }

    let files: Vec<PathBuf> = glob(input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("txt"))
        })
        .collect();

    Ok(files)
}
