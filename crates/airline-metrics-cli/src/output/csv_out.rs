use serde_json::Value;
use std::io;

use super::{flatten, result_of, scalar_text};

/// Write output as a two-column `field,value` CSV to stdout.
///
/// Nested per-year results become dotted field paths, so multi-year
/// analyses and comparisons stay one flat file.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let mut rows = Vec::new();
    flatten("", result_of(value), &mut rows);

    let _ = wtr.write_record(["field", "value"]);
    for (key, val) in &rows {
        let _ = wtr.write_record([key.as_str(), &scalar_text(val, "")]);
    }

    if let Some(Value::Array(warnings)) = value.get("warnings") {
        for w in warnings {
            let _ = wtr.write_record(["warning", &scalar_text(w, "")]);
        }
    }

    let _ = wtr.flush();
}
