//! Menu-driven extraction for users who run the binary without arguments.

use std::path::PathBuf;

use dialoguer::{Confirm, Input, MultiSelect, Select};
use ethics_extract::{ExtractOptions, OcrMode};
use ethics_extract_cli_utils::MultiProgress;
use ethics_extract_export::{DEFAULT_STEM, ExportFormat};

use crate::pipeline::{self, OutputOptions, RunOptions};

enum Action {
    Extract,
    Summary,
}

impl Action {
    const ALL: &[Self] = &[Self::Extract, Self::Summary];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Extract => "Extract contributions and save files",
            Self::Summary => "Show summary only",
        }
    }
}

/// Prompts for an input report and runs the chosen action.
///
/// # Errors
///
/// Returns an error if a prompt fails or the extraction or export fails.
pub async fn run(multi: &MultiProgress) -> Result<(), Box<dyn std::error::Error>> {
    let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();

    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    let input: String = Input::new()
        .with_prompt("Report PDF (path or URL)")
        .interact_text()?;

    let use_ocr = Confirm::new()
        .with_prompt("OCR scanned pages (requires pdftoppm and tesseract)?")
        .default(true)
        .interact()?;

    let options = RunOptions {
        input: input.trim().to_owned(),
        markers: None,
        extract: ExtractOptions {
            ocr: if use_ocr {
                OcrMode::Auto
            } else {
                OcrMode::Disabled
            },
            ..ExtractOptions::default()
        },
    };

    match Action::ALL[idx] {
        Action::Summary => pipeline::summarize(multi, &options).await,
        Action::Extract => {
            let output = prompt_output()?;
            pipeline::run(multi, &options, &output).await
        }
    }
}

fn prompt_output() -> Result<OutputOptions, Box<dyn std::error::Error>> {
    let format_labels: Vec<&str> = ExportFormat::ALL.iter().map(|f| f.extension()).collect();

    let selected = MultiSelect::new()
        .with_prompt("Export formats (space=toggle, enter=confirm)")
        .items(&format_labels)
        .defaults(&[true, true])
        .interact()?;

    if selected.is_empty() {
        println!("No formats selected; results will only be previewed.");
    }

    let out_dir: String = Input::new()
        .with_prompt("Output directory")
        .default(".".to_string())
        .interact_text()?;

    Ok(OutputOptions {
        out_dir: PathBuf::from(out_dir),
        stem: DEFAULT_STEM.to_owned(),
        formats: selected.into_iter().map(|i| ExportFormat::ALL[i]).collect(),
        preview: 10,
    })
}
