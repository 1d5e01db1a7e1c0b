use serde_json::Value;
use std::io;

use super::flatten;

/// Write output as CSV to stdout.
///
/// Objects become `field,value` rows with nested keys flattened; arrays of
/// objects become one record per element.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result {
        Value::Array(arr) => write_array_csv(&mut wtr, arr),
        Value::Object(_) => {
            let _ = wtr.write_record(["field", "value"]);
            for (key, val) in flatten(result) {
                let _ = wtr.write_record([key, format_csv_value(&val)]);
            }
        }
        _ => {
            let _ = wtr.write_record([format_csv_value(result)]);
        }
    }

    let _ = wtr.flush();
}

fn write_array_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, arr: &[Value]) {
    let Some(first) = arr.first() else {
        return;
    };
    if !first.is_object() {
        for item in arr {
            let _ = wtr.write_record([format_csv_value(item)]);
        }
        return;
    }

    let headers: Vec<String> = flatten(first).into_iter().map(|(k, _)| k).collect();
    let _ = wtr.write_record(&headers);
    for item in arr {
        let cells = flatten(item);
        let row: Vec<String> = headers
            .iter()
            .map(|h| {
                cells
                    .iter()
                    .find(|(k, _)| k == h)
                    .map(|(_, v)| format_csv_value(v))
                    .unwrap_or_default()
            })
            .collect();
        let _ = wtr.write_record(&row);
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => arr
            .iter()
            .map(format_csv_value)
            .collect::<Vec<_>>()
            .join("; "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
