use std::io::{self, Write};

use serde_json::Value;

/// Pretty-print a result document to stdout.
pub fn print_json(value: &Value) {
    let stdout = io::stdout();
    if let Err(e) = write_json(&mut stdout.lock(), value) {
        tracing::error!(error = %e, "failed to write JSON output");
    }
}

/// Decimal fields are number literals carrying their exact digits, so this
/// never rounds amounts.
pub fn write_json<W: Write>(writer: &mut W, value: &Value) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn test_write_json_keeps_decimal_digits() {
        let value = Decimal::from_str("312500.10").unwrap();
        let mut buf = Vec::new();
        write_json(&mut buf, &json!({ "estimated_value": value })).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("\"estimated_value\": 312500.10"));
        assert!(text.ends_with('\n'));
    }
}
