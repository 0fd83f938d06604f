use serde_json::Value;

use super::{result_of, scalar_text};

/// Priority list of headline fields, searched in order.
const PRIORITY_KEYS: [&str; 6] = [
    "break_even_load_factor",
    "passenger_load_factor",
    "operating_margin",
    "net_margin",
    "current_ratio",
    "valid",
];

/// Print just the key answer value from the output.
///
/// Looks for a headline field in the result, then in its nested `metrics`
/// object, then in the newest year of a multi-year result; falls back to the
/// first field.
pub fn print_minimal(value: &Value) {
    let result_obj = result_of(value);

    let candidates = [
        Some(result_obj),
        result_obj.get("metrics"),
        result_obj
            .get("years")
            .and_then(|y| y.get(0))
            .and_then(|y| y.get("airline").filter(|a| !a.is_null())),
        result_obj
            .get("years")
            .and_then(|y| y.get(0))
            .and_then(|y| y.get("financial")),
    ];

    for obj in candidates.into_iter().flatten() {
        if let Some(found) = headline(obj) {
            println!("{}", found);
            return;
        }
    }

    // Fall back to first field
    if let Value::Object(map) = result_obj {
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, scalar_text(val, "null"));
            return;
        }
    }

    println!("{}", scalar_text(result_obj, "null"));
}

fn headline(obj: &Value) -> Option<String> {
    let map = obj.as_object()?;
    PRIORITY_KEYS
        .iter()
        .filter_map(|key| map.get(*key))
        .find(|val| !val.is_null())
        .map(|val| scalar_text(val, "null"))
}
