use serde_json::Value;

use super::format_value;

/// Print just the key answer from the output.
///
/// A `summary` wins outright, then the risk `level`; otherwise every scalar
/// of the result is printed as `key: value`.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let priority_keys = ["summary", "level", "is_financial_document"];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_value(val));
                    return;
                }
            }
        }

        for (key, val) in map {
            if !val.is_object() {
                println!("{}: {}", key, format_value(val));
            }
        }
        return;
    }

    println!("{}", format_value(result_obj));
}
