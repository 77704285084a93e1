use serde_json::Value;
use std::io;

use super::{comparison_rows, flatten, result_of};

/// Write output as CSV to stdout.
///
/// Comparison reports become one row per ranked offer with dotted column
/// names; other results become `field,value` pairs. Values keep full
/// precision.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    if let Some(rows) = comparison_rows(value) {
        write_rows(&mut wtr, rows);
    } else if let Value::Object(map) = result_of(value) {
        let _ = wtr.write_record(["field", "value"]);
        for (key, val) in flatten(map) {
            let _ = wtr.write_record([key.as_str(), &format_csv_value(&val)]);
        }
    } else {
        let _ = wtr.write_record([&format_csv_value(value)]);
    }

    let _ = wtr.flush();
}

fn write_rows(wtr: &mut csv::Writer<io::StdoutLock<'_>>, rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        return;
    };

    let headers: Vec<String> = flatten(first).into_iter().map(|(k, _)| k).collect();
    let mut header_record = vec!["rank".to_string()];
    header_record.extend(headers.iter().cloned());
    let _ = wtr.write_record(&header_record);

    for (rank, row) in rows.iter().enumerate() {
        let Value::Object(map) = row else { continue };
        let flat = flatten(map);
        let mut record = vec![(rank + 1).to_string()];
        record.extend(headers.iter().map(|h| {
            flat.iter()
                .find(|(k, _)| k == h)
                .map(|(_, v)| format_csv_value(v))
                .unwrap_or_default()
        }));
        let _ = wtr.write_record(&record);
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
            .join(";"),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
