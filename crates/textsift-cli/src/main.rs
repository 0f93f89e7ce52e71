//! CLI application for heuristic field extraction from plain-text documents.

mod commands;

use std::fs;
use std::path::Path;
use std::sync::Mutex;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use textsift_core::TextsiftConfig;

use commands::{batch, config, process};

/// textsift - Extract dates, vendors, invoice numbers and amounts from text files
#[derive(Parser)]
#[command(name = "textsift")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a single text file
    Process(process::ProcessArgs),

    /// Process a directory of text files into one CSV
    Batch(batch::BatchArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    init_logging(level, cli.config.as_deref())?;

    // Execute command
    match cli.command {
        Commands::Process(args) => process::run(args, cli.config.as_deref()).await,
        Commands::Batch(args) => batch::run(args, cli.config.as_deref()).await,
        Commands::Config(args) => config::run(args).await,
    }
}

/// Install the global subscriber. When the configuration names a log
/// directory, events go to a timestamped file there instead of stderr.
fn init_logging(level: Level, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = match config_path {
        Some(path) => TextsiftConfig::from_file(Path::new(path))?,
        None => TextsiftConfig::default(),
    };

    if let Some(log_dir) = &config.io.log_dir {
        fs::create_dir_all(log_dir)?;
        let log_path = log_dir.join(format!(
            "textsift-{}.log",
            chrono::Local::now().format("%Y%m%d-%H%M%S")
        ));
        let file = fs::File::create(&log_path)?;

        let subscriber = FmtSubscriber::builder()
            .with_max_level(level)
            .with_target(false)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(level)
            .with_target(false)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }

    Ok(())
}
