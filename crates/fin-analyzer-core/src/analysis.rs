use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::info;

use crate::extraction::{normalize_text, RuleSet};
use crate::ratios::{compute_ratios, RatioResult, RatioValue};
use crate::report::{format_report, NO_DOCUMENT_TEXT};
use crate::risk::{assess_risk, RiskReport};
use crate::types::*;
use crate::verification::{verify_with_fields, DocumentVerification};

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Everything the engine derives from one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    pub fields: FieldMapping,
    pub ratios: RatioResult,
    pub risk: RiskReport,
    pub verification: DocumentVerification,
    pub summary: String,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run the full pipeline with the standard rules.
pub fn analyze(text: &str) -> DocumentAnalysis {
    analyze_with_rules(text, RuleSet::standard())
}

pub fn analyze_with_rules(text: &str, rules: &RuleSet) -> DocumentAnalysis {
    let normalized = normalize_text(text);
    let fields = rules.extract(&normalized);
    let ratios = compute_ratios(&fields);
    let risk = assess_risk(&fields);
    let verification = verify_with_fields(&normalized, &fields);

    let summary = if normalized.is_empty() {
        NO_DOCUMENT_TEXT.to_string()
    } else {
        format_report(&fields, &ratios)
    };

    info!(
        fields = fields.len(),
        risk = %risk.level,
        doc_type = %verification.doc_type,
        "analysed document"
    );

    DocumentAnalysis {
        fields,
        ratios,
        risk,
        verification,
        summary,
    }
}

/// [`analyze`] wrapped in the standard envelope, with warnings for every
/// figure that was not found and every ratio that could not be computed.
pub fn analyze_with_metadata(text: &str) -> ComputationOutput<DocumentAnalysis> {
    let start = Instant::now();
    let analysis = analyze(text);
    let warnings = collect_warnings(&analysis);

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "matching": "case-insensitive keyword substring per line",
        "value_selection": "last numeric token on the last matching line",
        "zero_operands": "treated as missing",
        "risk_thresholds": { "high": 2.0, "medium": 1.0 }
    });

    with_metadata(
        "Heuristic keyword extraction with ratio and leverage/profitability risk scoring",
        &assumptions,
        warnings,
        elapsed,
        analysis,
    )
}

fn collect_warnings(analysis: &DocumentAnalysis) -> Vec<String> {
    let mut warnings: Vec<String> = analysis
        .fields
        .missing()
        .into_iter()
        .map(|f| format!("No value found for {f}."))
        .collect();

    for (name, value) in analysis.ratios.iter() {
        if value == RatioValue::NotAvailable {
            warnings.push(format!("{name} could not be computed."));
        }
    }

    if !analysis.verification.is_financial_document {
        warnings.push(format!(
            "Document may not be a financial statement: {}",
            analysis.verification.explanation
        ));
    }
    warnings
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
