pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Flatten nested objects into `(dotted.key, value)` rows.
///
/// Arrays of scalars stay as a single row and are joined by the caller;
/// arrays of objects are indexed, e.g. `trends[0].metric`.
pub fn flatten(value: &Value) -> Vec<(String, Value)> {
    let mut rows = Vec::new();
    flatten_into(String::new(), value, &mut rows);
    rows
}

fn flatten_into(prefix: String, value: &Value, rows: &mut Vec<(String, Value)>) {
    let join = |key: &str| {
        if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{prefix}.{key}")
        }
    };
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, val) in map {
                flatten_into(join(key), val, rows);
            }
        }
        Value::Array(arr) if arr.iter().any(Value::is_object) => {
            for (i, item) in arr.iter().enumerate() {
                flatten_into(format!("{prefix}[{i}]"), item, rows);
            }
        }
        _ => rows.push((prefix, value.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_nested() {
        let value = json!({
            "overall_score": "72",
            "category_scores": { "liquidity": "55" },
            "strengths": ["a", "b"],
            "methods": [{ "name": "asset_based" }]
        });
        let keys: Vec<String> = flatten(&value).into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                "category_scores.liquidity",
                "methods[0].name",
                "overall_score",
                "strengths",
            ]
        );
    }
}
