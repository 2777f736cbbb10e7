use clap::Args;
use serde_json::{json, Value};

use fin_analyzer_core::report::NO_DOCUMENT_TEXT;
use fin_analyzer_core::{analysis, compute_ratios, extract, format_report, verification};

use crate::input::{self, DocumentArgs};

/// Arguments for the full analysis pipeline
#[derive(Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub document: DocumentArgs,

    /// Return only the analysis, without the methodology/warnings envelope
    #[arg(long)]
    pub bare: bool,
}

pub fn run_extract(args: DocumentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let text = input::load_document(&args)?;
    let fields = extract(&text);
    Ok(serde_json::to_value(fields)?)
}

pub fn run_report(args: DocumentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let text = input::load_document(&args)?;
    let summary = if text.is_empty() {
        NO_DOCUMENT_TEXT.to_string()
    } else {
        let fields = extract(&text);
        format_report(&fields, &compute_ratios(&fields))
    };
    Ok(json!({ "summary": summary }))
}

pub fn run_verify(args: DocumentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let text = input::load_document(&args)?;
    let result = verification::verify(&text);
    Ok(serde_json::to_value(result)?)
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let text = input::load_document(&args.document)?;
    if args.bare {
        return Ok(serde_json::to_value(analysis::analyze(&text))?);
    }
    Ok(serde_json::to_value(analysis::analyze_with_metadata(&text))?)
}
