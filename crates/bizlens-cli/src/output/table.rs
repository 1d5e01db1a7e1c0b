use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::flatten;

/// Format output as a two-column table using the tabled crate.
pub fn print_table(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result {
        Value::Array(arr) => print_array_table(arr),
        Value::Object(_) => print_field_table(result),
        _ => println!("{}", format_value(result)),
    }

    let Some(envelope) = value.as_object().filter(|m| m.contains_key("result")) else {
        return;
    };

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

fn print_field_table(value: &Value) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in flatten(value) {
        builder.push_record([key, format_value(&val)]);
    }
    println!("{}", Table::from(builder));
}

/// One row per element, e.g. the standard trend set.
fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    let Some(first) = arr.first().filter(|v| v.is_object()) else {
        for item in arr {
            println!("{}", format_value(item));
        }
        return;
    };

    let headers: Vec<String> = flatten(first).into_iter().map(|(k, _)| k).collect();
    let mut builder = Builder::default();
    builder.push_record(headers.clone());
    for item in arr {
        let cells = flatten(item);
        let row: Vec<String> = headers
            .iter()
            .map(|h| {
                cells
                    .iter()
                    .find(|(k, _)| k == h)
                    .map(|(_, v)| format_value(v))
                    .unwrap_or_default()
            })
            .collect();
        builder.push_record(row);
    }
    println!("{}", Table::from(builder));
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join("; ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
