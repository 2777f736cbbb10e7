use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::{AnalyzerError, AnalyzerResult, FieldName};

/// A set of case-insensitive substrings that classify a line as carrying a
/// value for one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub field: FieldName,
    pub keywords: Vec<String>,
}

impl KeywordRule {
    pub fn new<I, S>(field: FieldName, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field,
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }

    /// `lowered` must already be lower-cased.
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
    }

    fn validate(&self) -> AnalyzerResult<()> {
        if self.keywords.is_empty() {
            return Err(AnalyzerError::InvalidRule {
                field: self.field.to_string(),
                reason: "A rule needs at least one keyword.".into(),
            });
        }
        for keyword in &self.keywords {
            if keyword.trim().is_empty() {
                return Err(AnalyzerError::InvalidRule {
                    field: self.field.to_string(),
                    reason: "Keywords cannot be blank.".into(),
                });
            }
            if keyword.to_lowercase() != *keyword {
                return Err(AnalyzerError::InvalidRule {
                    field: self.field.to_string(),
                    reason: format!("Keyword '{keyword}' must be lower-case."),
                });
            }
        }
        Ok(())
    }
}

/// Ordered collection of keyword rules. Every rule is tested against every
/// line; rule order has no effect on the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    rules: Vec<KeywordRule>,
}

static STANDARD_RULES: Lazy<RuleSet> = Lazy::new(|| RuleSet {
    rules: vec![
        KeywordRule::new(FieldName::TotalAssets, ["total assets", "assets"]),
        KeywordRule::new(FieldName::TotalLiabilities, ["total liabilities", "liabilities"]),
        KeywordRule::new(FieldName::Revenue, ["revenue", "total revenue", "sales"]),
        KeywordRule::new(FieldName::NetIncome, ["net income", "profit", "net profit"]),
        KeywordRule::new(
            FieldName::Equity,
            ["equity", "shareholders' equity", "total equity"],
        ),
    ],
});

impl RuleSet {
    pub fn new(rules: Vec<KeywordRule>) -> AnalyzerResult<Self> {
        for rule in &rules {
            rule.validate()?;
        }
        Ok(Self { rules })
    }

    /// The five built-in balance-sheet and income-statement rules.
    pub fn standard() -> &'static RuleSet {
        &STANDARD_RULES
    }

    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    /// Fields whose rule matches the given lower-cased line.
    pub fn matching_fields<'a>(&'a self, lowered: &'a str) -> impl Iterator<Item = FieldName> + 'a {
        self.rules
            .iter()
            .filter(move |rule| rule.matches(lowered))
            .map(|rule| rule.field)
    }
}
