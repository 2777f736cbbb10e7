pub mod analysis;
pub mod error;
pub mod extraction;
pub mod ratios;
pub mod report;
pub mod risk;
pub mod types;
pub mod verification;

#[cfg(feature = "capabilities")]
pub mod capabilities;

pub use analysis::{analyze, analyze_with_metadata, DocumentAnalysis};
pub use error::AnalyzerError;
pub use extraction::extract;
pub use ratios::{compute_ratios, RatioName, RatioResult, RatioValue};
pub use report::format_report;
pub use risk::{assess_risk, RiskLevel, RiskRationale, RiskReport};
pub use types::*;

/// Standard result type for fallible analyzer operations
pub type AnalyzerResult<T> = Result<T, AnalyzerError>;
