use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{flatten, scalar_text};

/// Format output as tables using the tabled crate.
///
/// Multi-year results print one table per fiscal year; a comparison's
/// per-metric rows print as a single wide table per year.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result(result);
                print_envelope_notes(map);
            } else {
                print_result(value);
            }
        }
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", value),
    }
}

fn print_result(result: &Value) {
    let Value::Object(res_map) = result else {
        println!("{}", scalar_text(result, "null"));
        return;
    };

    let mut header = Map::new();
    for (key, val) in res_map {
        if key != "years" {
            header.insert(key.clone(), val.clone());
        }
    }
    if !header.is_empty() {
        print_flat_object(&Value::Object(header));
    }

    if let Some(Value::Array(years)) = res_map.get("years") {
        for year in years {
            print_year(year);
        }
    }
}

fn print_year(year: &Value) {
    let Value::Object(map) = year else {
        return;
    };
    let label = map
        .get("fiscal_year")
        .map(|y| scalar_text(y, "?"))
        .unwrap_or_else(|| "?".into());
    println!("\nFY{}", label);

    match map.get("metrics") {
        // Comparison year: rows of metric / value_a / value_b / delta
        Some(Value::Array(rows)) => {
            let mut rest = map.clone();
            rest.remove("metrics");
            rest.remove("fiscal_year");
            print_flat_object(&Value::Object(rest));
            print_array_table(rows);
        }
        _ => {
            let mut rest = map.clone();
            rest.remove("fiscal_year");
            print_flat_object(&Value::Object(rest));
        }
    }
}

fn print_envelope_notes(envelope: &Map<String, Value>) {
    // Print warnings if any
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

    // Print methodology
    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_flat_object(value: &Value) {
    let mut rows = Vec::new();
    flatten("", value, &mut rows);

    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in &rows {
        builder.push_record([key.as_str(), &scalar_text(val, "-")]);
    }
    println!("{}", Table::from(builder));
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    // Collect all keys from first object for headers
    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| {
                        map.get(h.as_str())
                            .map(|v| scalar_text(v, "-"))
                            .unwrap_or_default()
                    })
                    .collect();
                builder.push_record(row);
            }
        }

        println!("{}", Table::from(builder));
    } else {
        // Simple array of values
        for item in arr {
            println!("{}", scalar_text(item, "-"));
        }
    }
}
