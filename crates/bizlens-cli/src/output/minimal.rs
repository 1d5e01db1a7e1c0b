use serde_json::Value;

/// Headline field for each kind of result, most specific first.
const PRIORITY_KEYS: [&str; 9] = [
    "estimated_value",
    "overall_score",
    "projected_revenue",
    "free_cash_flow",
    "change_percent",
    "completeness",
    "net_profit_margin",
    "health_score",
    "revenue",
];

/// Print just the key answer value from the output.
///
/// A full report prints its health score and, when present, the
/// valuation on separate lines.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        if map.contains_key("health_score") && map.contains_key("statement") {
            print_report_headline(map);
            return;
        }

        for key in &PRIORITY_KEYS {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_minimal(headline(val)));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result_obj));
}

fn print_report_headline(map: &serde_json::Map<String, Value>) {
    if let Some(score) = map.get("health_score").and_then(|h| h.get("overall_score")) {
        println!("health: {}", format_minimal(score));
    }
    if let Some(value) = map.get("valuation").and_then(|v| v.get("estimated_value")) {
        println!("value: {}", format_minimal(value));
    }
}

/// Completeness is an object; its `overall` field is the headline.
fn headline(value: &Value) -> &Value {
    value.get("overall").unwrap_or(value)
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
