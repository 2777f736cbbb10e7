//! Fixed capability lists for the callers that drive the engine.
//!
//! A caller picks a [`Role`] (or declares its own list) when it builds a
//! [`Toolkit`]; anything outside that list is refused at invocation time.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::analysis::analyze;
use crate::extraction::extract;
use crate::ratios::{compute_ratios, RatioResult};
use crate::risk::{assess_risk, RiskReport};
use crate::types::FieldMapping;
use crate::verification::{verify, DocumentVerification};
use crate::{AnalyzerError, AnalyzerResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Extract,
    ComputeRatios,
    AssessRisk,
    FormatReport,
    Verify,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Extract => "extract",
            Self::ComputeRatios => "compute_ratios",
            Self::AssessRisk => "assess_risk",
            Self::FormatReport => "format_report",
            Self::Verify => "verify",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    FinancialAnalyst,
    Verifier,
    InvestmentAdvisor,
    RiskAssessor,
}

impl Role {
    pub fn capabilities(&self) -> &'static [Capability] {
        use Capability::*;
        match self {
            Self::FinancialAnalyst => &[Extract, ComputeRatios, AssessRisk, FormatReport, Verify],
            Self::Verifier => &[Extract, Verify],
            Self::InvestmentAdvisor => &[Extract, ComputeRatios, FormatReport],
            Self::RiskAssessor => &[Extract, AssessRisk],
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::FinancialAnalyst => "financial_analyst",
            Self::Verifier => "verifier",
            Self::InvestmentAdvisor => "investment_advisor",
            Self::RiskAssessor => "risk_assessor",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "capability", content = "output", rename_all = "snake_case")]
pub enum ToolOutput {
    Extract(FieldMapping),
    ComputeRatios(RatioResult),
    AssessRisk(RiskReport),
    FormatReport(String),
    Verify(DocumentVerification),
}

#[derive(Debug, Clone)]
pub struct Toolkit {
    owner: String,
    granted: Vec<Capability>,
}

impl Toolkit {
    pub fn new(owner: impl Into<String>, granted: &[Capability]) -> Self {
        let mut caps: Vec<Capability> = Vec::with_capacity(granted.len());
        for cap in granted {
            if !caps.contains(cap) {
                caps.push(*cap);
            }
        }
        Self {
            owner: owner.into(),
            granted: caps,
        }
    }

    pub fn for_role(role: Role) -> Self {
        Self::new(role.to_string(), role.capabilities())
    }

    pub fn grants(&self, capability: Capability) -> bool {
        self.granted.contains(&capability)
    }

    pub fn granted(&self) -> &[Capability] {
        &self.granted
    }

    /// Run one capability over raw document text.
    pub fn invoke(&self, capability: Capability, text: &str) -> AnalyzerResult<ToolOutput> {
        if !self.grants(capability) {
            return Err(AnalyzerError::CapabilityNotGranted {
                capability: capability.to_string(),
                role: self.owner.clone(),
            });
        }

        let output = match capability {
            Capability::Extract => ToolOutput::Extract(extract(text)),
            Capability::ComputeRatios => ToolOutput::ComputeRatios(compute_ratios(&extract(text))),
            Capability::AssessRisk => ToolOutput::AssessRisk(assess_risk(&extract(text))),
            Capability::FormatReport => ToolOutput::FormatReport(analyze(text).summary),
            Capability::Verify => ToolOutput::Verify(verify(text)),
        };
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::RiskLevel;

    #[test]
    fn test_analyst_has_everything() {
        let kit = Toolkit::for_role(Role::FinancialAnalyst);
        assert_eq!(kit.granted().len(), 5);
    }

    #[test]
    fn test_risk_assessor_runs_risk() {
        let kit = Toolkit::for_role(Role::RiskAssessor);
        let out = kit
            .invoke(Capability::AssessRisk, "Liabilities: 500\nEquity: 100")
            .unwrap();
        match out {
            ToolOutput::AssessRisk(report) => assert_eq!(report.level, RiskLevel::High),
            other => panic!("Expected AssessRisk, got {other:?}"),
        }
    }

    #[test]
    fn test_undeclared_capability_is_refused() {
        let kit = Toolkit::for_role(Role::Verifier);
        let err = kit.invoke(Capability::FormatReport, "Revenue: 10").unwrap_err();
        match err {
            AnalyzerError::CapabilityNotGranted { capability, role } => {
                assert_eq!(capability, "format_report");
                assert_eq!(role, "verifier");
            }
            other => panic!("Expected CapabilityNotGranted, got {other:?}"),
        }
    }

    #[test]
    fn test_custom_toolkit() {
        let kit = Toolkit::new("pipeline", &[Capability::Extract]);
        assert!(kit.grants(Capability::Extract));
        assert!(!kit.grants(Capability::Verify));
    }

    #[test]
    fn test_empty_text_report_placeholder() {
        let kit = Toolkit::for_role(Role::InvestmentAdvisor);
        match kit.invoke(Capability::FormatReport, "").unwrap() {
            ToolOutput::FormatReport(s) => assert_eq!(s, "No document text provided."),
            other => panic!("Expected FormatReport, got {other:?}"),
        }
    }
}
