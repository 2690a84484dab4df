use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

/// Turn receipt OCR output into structured, categorized receipt data.
#[derive(Parser)]
#[command(name = "slip")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Extractor configuration (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print single-line JSON
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract fields from OCR text (FILE, or stdin when omitted or `-`)
    Extract { file: Option<PathBuf> },

    /// Run an image through the OCR engine, then extract
    Scan {
        image: PathBuf,

        /// Tesseract data directory
        #[arg(long)]
        tessdata: Option<PathBuf>,

        /// Tesseract language
        #[arg(long, default_value = "eng")]
        lang: String,
    },

    /// List the active category taxonomy
    Categories,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only JSON.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let extractor = commands::load_extractor(cli.config.as_deref())?;

    let output = match cli.command {
        Commands::Extract { file } => {
            let text = commands::read_input(file.as_deref())?;
            commands::extract(extractor, &text, cli.compact)?
        }
        Commands::Scan { image, tessdata, lang } => {
            let backend = commands::ocr_backend(tessdata, &lang);
            commands::scan(backend, extractor, &image, cli.compact).await?
        }
        Commands::Categories => commands::categories(&extractor, cli.compact)?,
    };

    println!("{output}");
    Ok(())
}
