use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::types::*;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioName {
    ProfitMargin,
    DebtToEquity,
    ReturnOnAssets,
}

impl RatioName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProfitMargin => "profit_margin",
            Self::DebtToEquity => "debt_to_equity",
            Self::ReturnOnAssets => "return_on_assets",
        }
    }

    /// Numerator and denominator fields.
    pub fn operands(&self) -> (FieldName, FieldName) {
        match self {
            Self::ProfitMargin => (FieldName::NetIncome, FieldName::Revenue),
            Self::DebtToEquity => (FieldName::TotalLiabilities, FieldName::Equity),
            Self::ReturnOnAssets => (FieldName::NetIncome, FieldName::TotalAssets),
        }
    }
}

impl fmt::Display for RatioName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A computed ratio, or an explicit marker that the division was attempted
/// but gave no usable number. Serializes as a number or `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<Rate>", into = "Option<Rate>")]
pub enum RatioValue {
    Value(Rate),
    NotAvailable,
}

impl RatioValue {
    pub fn value(&self) -> Option<Rate> {
        match self {
            Self::Value(v) => Some(*v),
            Self::NotAvailable => None,
        }
    }
}

impl From<Option<Rate>> for RatioValue {
    fn from(v: Option<Rate>) -> Self {
        v.map_or(Self::NotAvailable, Self::Value)
    }
}

impl From<RatioValue> for Option<Rate> {
    fn from(v: RatioValue) -> Self {
        v.value()
    }
}

impl fmt::Display for RatioValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v:.4}"),
            Self::NotAvailable => f.write_str("n/a"),
        }
    }
}

/// Ratios in computation order. Ratios whose inputs were missing are absent,
/// not zero-filled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatioResult {
    #[serde(skip_serializing_if = "Option::is_none", default, deserialize_with = "present_ratio")]
    pub profit_margin: Option<RatioValue>,
    #[serde(skip_serializing_if = "Option::is_none", default, deserialize_with = "present_ratio")]
    pub debt_to_equity: Option<RatioValue>,
    #[serde(skip_serializing_if = "Option::is_none", default, deserialize_with = "present_ratio")]
    pub return_on_assets: Option<RatioValue>,
}

/// A key that is present is a computed ratio, even when its value is `null`.
/// Absent keys fall back to `None` through `default`.
fn present_ratio<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<RatioValue>, D::Error> {
    Option::<Rate>::deserialize(deserializer).map(|v| Some(v.into()))
}

impl RatioResult {
    pub fn get(&self, name: RatioName) -> Option<RatioValue> {
        match name {
            RatioName::ProfitMargin => self.profit_margin,
            RatioName::DebtToEquity => self.debt_to_equity,
            RatioName::ReturnOnAssets => self.return_on_assets,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (RatioName, RatioValue)> + '_ {
        [
            RatioName::ProfitMargin,
            RatioName::DebtToEquity,
            RatioName::ReturnOnAssets,
        ]
        .into_iter()
        .filter_map(|name| self.get(name).map(|v| (name, v)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute profit margin, debt-to-equity and return on assets. A ratio is
/// only attempted when both operands are present and nonzero.
pub fn compute_ratios(fields: &FieldMapping) -> RatioResult {
    RatioResult {
        profit_margin: ratio(fields, RatioName::ProfitMargin),
        debt_to_equity: ratio(fields, RatioName::DebtToEquity),
        return_on_assets: ratio(fields, RatioName::ReturnOnAssets),
    }
}

fn ratio(fields: &FieldMapping, name: RatioName) -> Option<RatioValue> {
    let (num, den) = name.operands();
    let numerator = fields.nonzero(num)?;
    let denominator = fields.nonzero(den)?;
    Some(safe_divide(numerator, denominator))
}

fn safe_divide(numerator: Money, denominator: Money) -> RatioValue {
    if denominator == 0.0 {
        return RatioValue::NotAvailable;
    }
    let q = numerator / denominator;
    if q.is_finite() {
        RatioValue::Value(q)
    } else {
        RatioValue::NotAvailable
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
