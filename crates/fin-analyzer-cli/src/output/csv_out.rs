use serde_json::Value;
use std::io;

use super::{flatten, format_value};

/// Write output as two-column CSV (`field,value`) to stdout. Nested objects
/// are flattened into dotted field names.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let body = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let mut rows = Vec::new();
    flatten("", body, &mut rows);

    let _ = wtr.write_record(["field", "value"]);
    for (key, val) in &rows {
        let _ = wtr.write_record([key.as_str(), &format_value(val)]);
    }

    let _ = wtr.flush();
}
