#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command line front end for Schedule A1 contribution extraction.
//!
//! `extract` writes CSV/XLSX files, `summary` prints only the metrics, and
//! running without a subcommand starts an interactive prompt. Logging goes
//! through [`ethics_extract_cli_utils::init_logger`] so `RUST_LOG` output
//! and the page progress bar share the terminal cleanly.

mod interactive;
mod pipeline;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use ethics_extract::{ExtractOptions, OcrMode};
use ethics_extract_export::{DEFAULT_STEM, ExportFormat};
use ethics_extract_pdf::fallback::DEFAULT_MIN_NATIVE_CHARS;
use ethics_extract_pdf::ocr::DEFAULT_DPI;

use crate::pipeline::{OutputOptions, RunOptions};

#[derive(Parser)]
#[command(
    name = "ethics_extract",
    about = "Extract Schedule A1 political contributions from Texas Ethics Commission reports"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract contributions and write timestamped CSV/XLSX files
    Extract {
        #[command(flatten)]
        source: SourceArgs,
        /// Directory the export files are written to
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        /// Which files to write
        #[arg(long, value_enum, default_value_t = FormatArg::Both)]
        format: FormatArg,
        /// Filename stem; a `_YYYYMMDD_HHMMSS` suffix is always appended
        #[arg(long, default_value = DEFAULT_STEM)]
        stem: String,
        /// Number of rows to preview before writing (0 to disable)
        #[arg(long, default_value_t = 10)]
        preview: usize,
    },
    /// Print record count, total amount and date range without writing files
    Summary {
        #[command(flatten)]
        source: SourceArgs,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// Path or http(s) URL of the report PDF
    input: String,
    /// Marker configuration TOML for other form variants
    #[arg(long)]
    markers: Option<PathBuf>,
    /// Never OCR, even for pages without a text layer
    #[arg(long)]
    no_ocr: bool,
    /// Native text at or below this many characters is sent to OCR
    #[arg(long, default_value_t = DEFAULT_MIN_NATIVE_CHARS)]
    min_native_chars: usize,
    /// Rasterization resolution for OCR
    #[arg(long, default_value_t = DEFAULT_DPI)]
    dpi: u32,
}

impl From<SourceArgs> for RunOptions {
    fn from(args: SourceArgs) -> Self {
        Self {
            input: args.input,
            markers: args.markers,
            extract: ExtractOptions {
                ocr: if args.no_ocr {
                    OcrMode::Disabled
                } else {
                    OcrMode::Auto
                },
                min_native_chars: args.min_native_chars,
                dpi: args.dpi,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Csv,
    Xlsx,
    Both,
}

impl FormatArg {
    const fn formats(self) -> &'static [ExportFormat] {
        match self {
            Self::Csv => &[ExportFormat::Csv],
            Self::Xlsx => &[ExportFormat::Xlsx],
            Self::Both => ExportFormat::ALL,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = ethics_extract_cli_utils::init_logger();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Texas Ethics Commission Contribution Extractor");
        println!();
        return interactive::run(&multi).await;
    };

    match command {
        Commands::Extract {
            source,
            out_dir,
            format,
            stem,
            preview,
        } => {
            let output = OutputOptions {
                out_dir,
                stem,
                formats: format.formats().to_vec(),
                preview,
            };
            pipeline::run(&multi, &source.into(), &output).await?;
        }
        Commands::Summary { source } => {
            pipeline::summarize(&multi, &source.into()).await?;
        }
    }

    Ok(())
}
