use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{flatten, format_value};

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result(result);
                print_envelope(map);
            } else {
                print_result(value);
            }
        }
        _ => println!("{}", format_value(value)),
    }
}

/// Scalars go into one Field/Value table; each nested object gets its own
/// titled table and a multi-line `summary` is printed verbatim.
fn print_result(result: &Value) {
    let Value::Object(map) = result else {
        println!("{}", format_value(result));
        return;
    };

    let mut scalars = Builder::default();
    scalars.push_record(["Field", "Value"]);
    let mut has_scalars = false;

    for (key, val) in map {
        match val {
            Value::Object(_) => {
                println!("{}", key);
                print_flat_object(val);
                println!();
            }
            Value::String(s) if key == "summary" => {
                println!("{}\n", s);
            }
            _ => {
                scalars.push_record([key.as_str(), &format_value(val)]);
                has_scalars = true;
            }
        }
    }

    if has_scalars {
        println!("{}", Table::from(scalars));
    }
}

fn print_flat_object(value: &Value) {
    let mut rows = Vec::new();
    flatten("", value, &mut rows);
    if rows.is_empty() || (rows.len() == 1 && rows[0].0.is_empty()) {
        println!("(empty)");
        return;
    }

    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in &rows {
        builder.push_record([key.as_str(), &format_value(val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_envelope(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}
