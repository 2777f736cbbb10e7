//! Keyword heuristic for deciding whether a text looks like a financial
//! statement, and which kind.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::extraction::extract;
use crate::types::FieldMapping;

const BALANCE_SHEET_MARKERS: &[&str] = &[
    "balance sheet",
    "statement of financial position",
    "total assets",
    "total liabilities",
];
const INCOME_STATEMENT_MARKERS: &[&str] = &[
    "income statement",
    "statement of operations",
    "profit and loss",
    "statement of comprehensive income",
    "net income",
];
const CASH_FLOW_MARKERS: &[&str] = &[
    "cash flow",
    "operating activities",
    "investing activities",
    "financing activities",
];
const INVOICE_MARKERS: &[&str] = &["invoice", "bill to", "amount due", "remit to"];

/// Fields needed before an unlabelled document is treated as financial.
const MIN_FIELDS_FOR_FINANCIAL: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocType {
    BalanceSheet,
    IncomeStatement,
    CashFlowStatement,
    /// More than one statement kind in the same document.
    FinancialStatement,
    Invoice,
    Unknown,
}

impl DocType {
    pub fn is_statement(&self) -> bool {
        matches!(
            self,
            Self::BalanceSheet
                | Self::IncomeStatement
                | Self::CashFlowStatement
                | Self::FinancialStatement
        )
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::BalanceSheet => "balance_sheet",
            Self::IncomeStatement => "income_statement",
            Self::CashFlowStatement => "cash_flow_statement",
            Self::FinancialStatement => "financial_statement",
            Self::Invoice => "invoice",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentVerification {
    pub is_financial_document: bool,
    pub doc_type: DocType,
    pub explanation: String,
}

pub fn verify(text: &str) -> DocumentVerification {
    verify_with_fields(text, &extract(text))
}

/// Same as [`verify`] when the caller already holds the extracted fields.
pub fn verify_with_fields(text: &str, fields: &FieldMapping) -> DocumentVerification {
    let lowered = text.to_lowercase();
    let hits = |markers: &[&str]| markers.iter().any(|m| lowered.contains(m));

    let statements: Vec<DocType> = [
        (DocType::BalanceSheet, hits(BALANCE_SHEET_MARKERS)),
        (DocType::IncomeStatement, hits(INCOME_STATEMENT_MARKERS)),
        (DocType::CashFlowStatement, hits(CASH_FLOW_MARKERS)),
    ]
    .into_iter()
    .filter_map(|(kind, hit)| hit.then_some(kind))
    .collect();

    let doc_type = match statements.as_slice() {
        [] if hits(INVOICE_MARKERS) => DocType::Invoice,
        [] => DocType::Unknown,
        [single] => *single,
        _ => DocType::FinancialStatement,
    };

    let enough_fields = fields.len() >= MIN_FIELDS_FOR_FINANCIAL;
    let is_financial_document =
        doc_type.is_statement() || (doc_type == DocType::Unknown && enough_fields);

    let explanation = if doc_type.is_statement() {
        let kinds: Vec<String> = statements.iter().map(ToString::to_string).collect();
        format!(
            "Found statement headings or line items for: {}; {} of 5 key figures extracted.",
            kinds.join(", "),
            fields.len()
        )
    } else if doc_type == DocType::Invoice {
        "Looks like an invoice rather than a financial statement.".to_string()
    } else if enough_fields {
        format!(
            "No statement headings found, but {} key figures were extracted.",
            fields.len()
        )
    } else {
        "No statement headings and too few key figures to classify the document.".to_string()
    };

    DocumentVerification {
        is_financial_document,
        doc_type,
        explanation,
    }
}
