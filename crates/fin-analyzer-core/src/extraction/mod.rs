//! Line-oriented keyword extraction of financial figures from document text.

pub mod extractor;
pub mod normalize;
pub mod rules;

pub use extractor::{extract, last_numeric_token, parse_last_number};
pub use normalize::{normalize_pages, normalize_text, split_lines};
pub use rules::{KeywordRule, RuleSet};
