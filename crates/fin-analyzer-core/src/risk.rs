use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::types::*;

/// Debt-to-equity is halved and capped before it enters the score.
const LEVERAGE_WEIGHT: f64 = 0.5;
const LEVERAGE_CAP: f64 = 2.0;
const NEGATIVE_INCOME_PENALTY: f64 = 1.0;
const THIN_MARGIN_THRESHOLD: Rate = 0.02;
const THIN_MARGIN_PENALTY: f64 = 0.8;
const HIGH_THRESHOLD: f64 = 2.0;
const MEDIUM_THRESHOLD: f64 = 1.0;

pub const INSUFFICIENT_DATA: &str = "Not enough data to determine risk.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= HIGH_THRESHOLD {
            Self::High
        } else if score >= MEDIUM_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        };
        f.write_str(s)
    }
}

/// Why a level was assigned: the signals that fired, or nothing at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "reasons", rename_all = "snake_case")]
pub enum RiskRationale {
    Reasons(Vec<String>),
    InsufficientData,
}

impl fmt::Display for RiskRationale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reasons(reasons) => f.write_str(&reasons.join(", ")),
            Self::InsufficientData => f.write_str(INSUFFICIENT_DATA),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    pub level: RiskLevel,
    pub score: f64,
    pub rationale: RiskRationale,
}

impl RiskReport {
    pub fn reasons(&self) -> &[String] {
        match &self.rationale {
            RiskRationale::Reasons(r) => r,
            RiskRationale::InsufficientData => &[],
        }
    }
}

impl fmt::Display for RiskReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Risk level: {}\nReasons: {}", self.level, self.rationale)
    }
}

/// Score leverage and profitability, then bucket the score.
///
/// Leverage contributes `min(D/E / 2, 2)`. A loss adds 1.0; a positive
/// margin under 2% adds 0.8. Scores of 2.0 and above are HIGH, 1.0 and
/// above MEDIUM.
pub fn assess_risk(fields: &FieldMapping) -> RiskReport {
    let mut score = 0.0;
    let mut reasons: Vec<String> = Vec::new();

    if let (Some(liabilities), Some(equity)) = (
        fields.nonzero(FieldName::TotalLiabilities),
        fields.nonzero(FieldName::Equity),
    ) {
        let dte = liabilities / equity;
        let contribution = (dte * LEVERAGE_WEIGHT).min(LEVERAGE_CAP);
        debug!(dte, contribution, "leverage contribution");
        score += contribution;
        reasons.push(format!("Debt-to-equity ~ {dte:.2}"));
    }

    if let (Some(revenue), Some(net_income)) = (
        fields.nonzero(FieldName::Revenue),
        fields.nonzero(FieldName::NetIncome),
    ) {
        if net_income < 0.0 {
            debug!(net_income, "negative net income");
            score += NEGATIVE_INCOME_PENALTY;
            reasons.push("Negative net income".into());
        } else {
            let pm = net_income / revenue;
            if pm < THIN_MARGIN_THRESHOLD {
                debug!(pm, "thin profit margin");
                score += THIN_MARGIN_PENALTY;
                reasons.push(format!("Very low profit margin ~ {pm:.4}"));
            }
        }
    }

    let rationale = if reasons.is_empty() {
        RiskRationale::InsufficientData
    } else {
        RiskRationale::Reasons(reasons)
    };

    RiskReport {
        level: RiskLevel::from_score(score),
        score,
        rationale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fields(entries: &[(FieldName, Money)]) -> FieldMapping {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_empty_fields_low_with_sentinel() {
        let report = assess_risk(&FieldMapping::new());
        assert_eq!(report.level, RiskLevel::Low);
        assert_eq!(report.rationale, RiskRationale::InsufficientData);
        assert_eq!(
            report.to_string(),
            "Risk level: LOW\nReasons: Not enough data to determine risk."
        );
    }

    #[test]
    fn test_leverage_of_four_is_high() {
        let report = assess_risk(&fields(&[
            (FieldName::TotalLiabilities, 400.0),
            (FieldName::Equity, 100.0),
        ]));
        assert_eq!(report.level, RiskLevel::High);
        assert_eq!(report.score, 2.0);
        assert_eq!(report.reasons(), ["Debt-to-equity ~ 4.00"]);
    }

    #[test]
    fn test_leverage_contribution_is_capped() {
        let report = assess_risk(&fields(&[
            (FieldName::TotalLiabilities, 1_000.0),
            (FieldName::Equity, 10.0),
        ]));
        assert_eq!(report.score, 2.0);
    }

    #[test]
    fn test_negative_income_is_medium() {
        let report = assess_risk(&fields(&[
            (FieldName::NetIncome, -200.0),
            (FieldName::Revenue, 1000.0),
        ]));
        assert_eq!(report.level, RiskLevel::Medium);
        assert_eq!(report.reasons(), ["Negative net income"]);
    }

    #[test]
    fn test_thin_margin_alone_is_low() {
        let report = assess_risk(&fields(&[
            (FieldName::Revenue, 10_000.0),
            (FieldName::NetIncome, 100.0),
        ]));
        assert_eq!(report.level, RiskLevel::Low);
        assert_eq!(report.reasons(), ["Very low profit margin ~ 0.0100"]);
    }

    #[test]
    fn test_thin_margin_plus_leverage_is_medium() {
        let report = assess_risk(&fields(&[
            (FieldName::TotalLiabilities, 60.0),
            (FieldName::Equity, 100.0),
            (FieldName::Revenue, 10_000.0),
            (FieldName::NetIncome, 100.0),
        ]));
        // 0.3 + 0.8
        assert_eq!(report.level, RiskLevel::Medium);
        assert_eq!(report.reasons().len(), 2);
    }

    #[test]
    fn test_healthy_margin_adds_nothing() {
        let report = assess_risk(&fields(&[
            (FieldName::Revenue, 1_000.0),
            (FieldName::NetIncome, 100.0),
        ]));
        assert_eq!(report.score, 0.0);
        assert_eq!(report.rationale, RiskRationale::InsufficientData);
    }

    #[test]
    fn test_zero_equity_skips_leverage() {
        let report = assess_risk(&fields(&[
            (FieldName::TotalLiabilities, 500.0),
            (FieldName::Equity, 0.0),
        ]));
        assert_eq!(report.level, RiskLevel::Low);
        assert_eq!(report.rationale, RiskRationale::InsufficientData);
    }

    #[test]
    fn test_level_serializes_upper_case() {
        assert_eq!(serde_json::to_string(&RiskLevel::Medium).unwrap(), r#""MEDIUM""#);
    }
}
