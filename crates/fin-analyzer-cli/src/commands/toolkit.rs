use clap::{Args, ValueEnum};
use serde_json::Value;

use fin_analyzer_core::capabilities::{Capability, Role, Toolkit};

use crate::input::{self, DocumentArgs};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RoleArg {
    Analyst,
    Verifier,
    Advisor,
    RiskAssessor,
}

impl From<RoleArg> for Role {
    fn from(r: RoleArg) -> Self {
        match r {
            RoleArg::Analyst => Role::FinancialAnalyst,
            RoleArg::Verifier => Role::Verifier,
            RoleArg::Advisor => Role::InvestmentAdvisor,
            RoleArg::RiskAssessor => Role::RiskAssessor,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CapabilityArg {
    Extract,
    Ratios,
    Risk,
    Report,
    Verify,
}

impl From<CapabilityArg> for Capability {
    fn from(c: CapabilityArg) -> Self {
        match c {
            CapabilityArg::Extract => Capability::Extract,
            CapabilityArg::Ratios => Capability::ComputeRatios,
            CapabilityArg::Risk => Capability::AssessRisk,
            CapabilityArg::Report => Capability::FormatReport,
            CapabilityArg::Verify => Capability::Verify,
        }
    }
}

/// Arguments for invoking a capability on behalf of a role
#[derive(Args)]
pub struct InvokeArgs {
    /// Role whose capability list applies
    #[arg(long, value_enum)]
    pub role: RoleArg,

    /// Capability to run
    #[arg(long, value_enum)]
    pub capability: CapabilityArg,

    #[command(flatten)]
    pub document: DocumentArgs,
}

pub fn run_invoke(args: InvokeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let toolkit = Toolkit::for_role(args.role.into());
    let text = input::load_document(&args.document)?;
    let output = toolkit.invoke(args.capability.into(), &text)?;
    Ok(serde_json::to_value(output)?)
}
