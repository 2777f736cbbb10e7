use crate::ratios::RatioResult;
use crate::types::{format_figure, FieldMapping};

pub const NO_DOCUMENT_TEXT: &str = "No document text provided.";

const FIELDS_HEADER: &str = "Extracted financial values (heuristic):";
const RATIOS_HEADER: &str = "Computed ratios (when possible):";
const DISCLAIMER: &str = "Notes: These results are heuristic. Manual verification is recommended.";

/// Render extracted figures and ratios as a plain-text summary.
pub fn format_report(fields: &FieldMapping, ratios: &RatioResult) -> String {
    let mut lines = Vec::with_capacity(fields.len() + 7);

    lines.push(FIELDS_HEADER.to_string());
    for (name, value) in fields.iter() {
        lines.push(format!("- {name}: {}", format_figure(value)));
    }
    lines.push(String::new());

    lines.push(RATIOS_HEADER.to_string());
    for (name, value) in ratios.iter() {
        lines.push(format!("- {name}: {value}"));
    }
    lines.push(String::new());

    lines.push(DISCLAIMER.to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ratios::RatioValue;
    use crate::FieldName;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_full_report_layout() {
        let fields: FieldMapping = [(FieldName::NetIncome, -200.0), (FieldName::Revenue, 1000.0)]
            .into_iter()
            .collect();
        let ratios = RatioResult {
            profit_margin: Some(RatioValue::Value(-0.2)),
            debt_to_equity: Some(RatioValue::NotAvailable),
            ..Default::default()
        };

        let expected = "\
Extracted financial values (heuristic):
- net_income: -200.0
- revenue: 1000.0

Computed ratios (when possible):
- profit_margin: -0.2000
- debt_to_equity: n/a

Notes: These results are heuristic. Manual verification is recommended.";
        assert_eq!(format_report(&fields, &ratios), expected);
    }

    #[test]
    fn test_empty_report_keeps_headers() {
        let report = format_report(&FieldMapping::new(), &RatioResult::default());
        assert_eq!(report.lines().count(), 5);
        assert!(report.ends_with(DISCLAIMER));
    }
}
