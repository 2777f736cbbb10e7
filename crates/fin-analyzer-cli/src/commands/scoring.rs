use clap::Args;
use serde_json::Value;

use fin_analyzer_core::{assess_risk, compute_ratios, extract, FieldMapping};

use crate::input::{self, DocumentArgs};

/// Arguments for commands that work from extracted figures
#[derive(Args)]
pub struct FieldsArgs {
    /// JSON file holding already-extracted figures (skips extraction)
    #[arg(long, conflicts_with_all = ["file", "text"])]
    pub fields: Option<String>,

    #[command(flatten)]
    pub document: DocumentArgs,
}

fn load_fields(args: &FieldsArgs) -> Result<FieldMapping, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.fields {
        return input::file::read_json(path);
    }
    let text = input::load_document(&args.document)?;
    Ok(extract(&text))
}

pub fn run_ratios(args: FieldsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let fields = load_fields(&args)?;
    Ok(serde_json::to_value(compute_ratios(&fields))?)
}

pub fn run_risk(args: FieldsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let fields = load_fields(&args)?;
    let report = assess_risk(&fields);
    let mut value = serde_json::to_value(&report)?;
    if let Value::Object(ref mut map) = value {
        map.insert("explanation".into(), Value::String(report.rationale.to_string()));
    }
    Ok(value)
}
