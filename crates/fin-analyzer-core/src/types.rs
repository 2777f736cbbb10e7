use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Monetary amounts as they appear in the document. Heuristic extraction
/// works on binary floats, never on exact decimals.
pub type Money = f64;

/// Ratios expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = f64;

/// The financial figures the extractor knows how to recognise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    TotalAssets,
    TotalLiabilities,
    Revenue,
    NetIncome,
    Equity,
}

impl FieldName {
    pub const ALL: [FieldName; 5] = [
        FieldName::TotalAssets,
        FieldName::TotalLiabilities,
        FieldName::Revenue,
        FieldName::NetIncome,
        FieldName::Equity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TotalAssets => "total_assets",
            Self::TotalLiabilities => "total_liabilities",
            Self::Revenue => "revenue",
            Self::NetIncome => "net_income",
            Self::Equity => "equity",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extracted figures keyed by field.
///
/// Iterates in first-insertion order. Overwriting an existing field replaces
/// its value but keeps its position, so a summary lists fields in the order
/// they were first seen in the document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMapping {
    entries: Vec<(FieldName, Money)>,
}

impl FieldMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: FieldName, value: Money) {
        match self.entries.iter_mut().find(|(name, _)| *name == field) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((field, value)),
        }
    }

    pub fn get(&self, field: FieldName) -> Option<Money> {
        self.entries
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| *value)
    }

    /// Returns the value only when it is present and nonzero. A zero figure
    /// carries no information for the ratio and risk heuristics.
    pub fn nonzero(&self, field: FieldName) -> Option<Money> {
        self.get(field).filter(|v| *v != 0.0)
    }

    pub fn contains(&self, field: FieldName) -> bool {
        self.get(field).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, Money)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fields the extractor recognises but did not find.
    pub fn missing(&self) -> Vec<FieldName> {
        FieldName::ALL
            .into_iter()
            .filter(|f| !self.contains(*f))
            .collect()
    }
}

impl FromIterator<(FieldName, Money)> for FieldMapping {
    fn from_iter<I: IntoIterator<Item = (FieldName, Money)>>(iter: I) -> Self {
        let mut mapping = FieldMapping::new();
        for (field, value) in iter {
            mapping.insert(field, value);
        }
        mapping
    }
}

impl Serialize for FieldMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, value) in &self.entries {
            map.serialize_entry(field, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FieldMapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FieldMappingVisitor;

        impl<'de> Visitor<'de> for FieldMappingVisitor {
            type Value = FieldMapping;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of financial field names to numbers")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<FieldMapping, A::Error> {
                let mut mapping = FieldMapping::new();
                while let Some((field, value)) = access.next_entry::<FieldName, Money>()? {
                    mapping.insert(field, value);
                }
                Ok(mapping)
            }
        }

        deserializer.deserialize_map(FieldMappingVisitor)
    }
}

/// Render a figure the way the summary has always shown it: integral values
/// keep a trailing `.0`, magnitudes below 1e-4 or from 1e16 up switch to
/// exponent form (`1e-05`, `1.5e+16`), everything else uses the shortest
/// round-trip form.
pub fn format_figure(value: Money) -> String {
    let magnitude = value.abs();
    if value.is_finite() && magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        return exponent_form(value);
    }
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

// Signed exponent padded to two digits.
fn exponent_form(value: Money) -> String {
    let raw = format!("{value:e}");
    let Some((mantissa, exponent)) = raw.split_once('e') else {
        return raw;
    };
    match exponent.parse::<i32>() {
        Ok(exp) => {
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exp.abs())
        }
        Err(_) => raw,
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "f64".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_overwrite_keeps_first_position() {
        let mut fields = FieldMapping::new();
        fields.insert(FieldName::Revenue, 10.0);
        fields.insert(FieldName::Equity, 20.0);
        fields.insert(FieldName::Revenue, 30.0);

        let order: Vec<_> = fields.iter().collect();
        assert_eq!(order, vec![(FieldName::Revenue, 30.0), (FieldName::Equity, 20.0)]);
    }

    #[test]
    fn test_nonzero_filters_zero() {
        let fields: FieldMapping = [(FieldName::Revenue, 0.0)].into_iter().collect();
        assert!(fields.contains(FieldName::Revenue));
        assert_eq!(fields.nonzero(FieldName::Revenue), None);
    }

    #[test]
    fn test_serializes_in_insertion_order() {
        let fields: FieldMapping = [(FieldName::NetIncome, -200.0), (FieldName::Revenue, 1000.0)]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&fields).unwrap();
        assert_eq!(json, r#"{"net_income":-200.0,"revenue":1000.0}"#);
    }

    #[test]
    fn test_deserialize_rejects_unknown_field() {
        let err = serde_json::from_str::<FieldMapping>(r#"{"ebitda": 5.0}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_format_figure() {
        assert_eq!(format_figure(100000.0), "100000.0");
        assert_eq!(format_figure(-200.0), "-200.0");
        assert_eq!(format_figure(12.5), "12.5");
        assert_eq!(format_figure(0.0), "0.0");
        assert_eq!(format_figure(0.0001), "0.0001");
    }

    #[test]
    fn test_format_figure_exponent_form() {
        assert_eq!(format_figure(0.00001), "1e-05");
        assert_eq!(format_figure(-0.0000123), "-1.23e-05");
        assert_eq!(format_figure(1e16), "1e+16");
        assert_eq!(format_figure(1.5e16), "1.5e+16");
        assert_eq!(format_figure(1.234e120), "1.234e+120");
        assert_eq!(format_figure(9999999999999998.0), "9999999999999998.0");
    }

    #[test]
    fn test_missing_lists_unset_fields() {
        let fields: FieldMapping = [(FieldName::Revenue, 1.0)].into_iter().collect();
        assert_eq!(fields.missing().len(), 4);
        assert!(!fields.missing().contains(&FieldName::Revenue));
    }
}
