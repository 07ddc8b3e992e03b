use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pdfocr::ocr::installed_languages;
use pdfocr::{process_directory, OcrConfig, PdfOcrProcessor};

#[derive(Debug, Parser)]
#[command(author, version, about = "Convert PDF documents to structured text via OCR")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// OCR a single PDF and write a JSON report
    Process(ProcessArgs),
    /// OCR every PDF under a directory
    Batch(BatchArgs),
    /// List the languages installed in the OCR engine
    Languages,
}

#[derive(Debug, Args)]
struct ProcessArgs {
    /// Path to the PDF file (prompted for when omitted)
    pdf: Option<PathBuf>,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Debug, Args)]
struct BatchArgs {
    /// Directory to scan for PDF files
    dir: PathBuf,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Debug, Args)]
struct CommonArgs {
    /// Path to a configuration JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Recognition language, repeatable (e.g. --lang eng --lang rus)
    #[arg(long = "lang")]
    languages: Vec<String>,

    /// Directory for JSON reports
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Render resolution in DPI
    #[arg(long)]
    dpi: Option<u32>,

    /// Rasterize and OCR even when the PDF has an embedded text layer
    #[arg(long)]
    force_ocr: bool,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process(args) => process_command(args),
        Commands::Batch(args) => batch_command(args),
        Commands::Languages => languages_command(),
    }
}

fn process_command(args: ProcessArgs) -> Result<()> {
    let config = load_config(&args.common)?;
    let pdf_path = match args.pdf {
        Some(path) => path,
        None => prompt_for_path()?,
    };

    let processor = PdfOcrProcessor::new(config)?;
    let (result, written) = processor.process_to_file(&pdf_path)?;

    info!(
        "Processed {:?}: {} pages, status {:?}, report at {:?}",
        pdf_path, result.page_count, result.status, written
    );
    Ok(())
}

fn batch_command(args: BatchArgs) -> Result<()> {
    let config = load_config(&args.common)?;
    let processor = PdfOcrProcessor::new(config)?;

    let written = process_directory(&processor, &args.dir)?;
    info!("Wrote {} reports", written.len());
    Ok(())
}

fn languages_command() -> Result<()> {
    let languages = installed_languages()?;
    for lang in languages {
        println!("{}", lang);
    }
    Ok(())
}

/// Load the config file if given, then apply CLI flag overrides.
fn load_config(args: &CommonArgs) -> Result<OcrConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from: {:?}", path);
            let config_str = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            serde_json::from_str(&config_str).with_context(|| "Failed to parse config JSON")?
        }
        None => OcrConfig::default(),
    };

    if !args.languages.is_empty() {
        config.languages = args.languages.clone();
    }
    if let Some(output_dir) = &args.output_dir {
        config.output_dir = output_dir.clone();
    }
    if let Some(dpi) = args.dpi {
        config.dpi = dpi;
    }
    if args.force_ocr {
        config.force_ocr = true;
    }

    Ok(config)
}

fn prompt_for_path() -> Result<PathBuf> {
    print!("Enter the path to a PDF file: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .with_context(|| "Failed to read path from stdin")?;

    Ok(PathBuf::from(line.trim()))
}
