use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

use super::normalize::split_lines;
use super::rules::RuleSet;
use crate::{FieldMapping, Money};

// Optional minus, a digit, then at least one more digit, comma or period.
// Single-digit figures are never picked up. ASCII digits only, matching what
// `f64::from_str` accepts.
static NUMERIC_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"-?[0-9][0-9,.]+").unwrap());

/// Extract figures with the standard keyword rules.
pub fn extract(text: &str) -> FieldMapping {
    RuleSet::standard().extract(text)
}

/// The last numeric token in a line that has already had its commas removed.
pub fn last_numeric_token(line: &str) -> Option<&str> {
    NUMERIC_TOKEN.find_iter(line).last().map(|m| m.as_str())
}

/// Strip thousands separators and parse the last numeric token of a line.
/// Tokens that do not parse, such as `1.2.3`, yield `None`.
pub fn parse_last_number(line: &str) -> Option<Money> {
    let cleaned = line.replace(',', "");
    let token = last_numeric_token(&cleaned)?;
    match token.parse::<Money>() {
        Ok(value) => Some(value),
        Err(_) => {
            trace!(token, "skipping unparseable numeric token");
            None
        }
    }
}

impl RuleSet {
    /// Scan `text` line by line. Each rule is evaluated independently against
    /// every line; a later matching line overwrites an earlier value, while a
    /// matching line without a usable number leaves the earlier value alone.
    pub fn extract(&self, text: &str) -> FieldMapping {
        let mut fields = FieldMapping::new();

        for line in split_lines(text) {
            let lowered = line.to_lowercase();
            let mut value: Option<Option<Money>> = None;

            for field in self.matching_fields(&lowered) {
                let parsed = *value.get_or_insert_with(|| parse_last_number(line));
                if let Some(v) = parsed {
                    debug!(field = field.as_str(), value = v, "extracted figure");
                    fields.insert(field, v);
                }
            }
        }

        fields
    }
}
