use serde_json::Value;

use super::{format_amount, lookup, result_of};

/// Print just the key answer of the output.
///
/// A comparison prints the best offer and its expected ROCE; other results
/// print the first well-known field present.
pub fn print_minimal(value: &Value) {
    let result = result_of(value);

    if let Some(Value::String(best)) = result.get("best_offer") {
        let roce = lookup(result, "results")
            .and_then(|r| r.get(0))
            .and_then(|r| lookup(r, "roce.expected.ratio"))
            .map(format_amount)
            .unwrap_or_default();
        println!("{}: {}", best, roce);
        return;
    }

    let priority_keys = ["periodic_payment", "ratio", "first_year_interest"];
    for key in &priority_keys {
        if let Some(val) = result.get(*key) {
            if !val.is_null() {
                println!("{}", format_amount(val));
                return;
            }
        }
    }

    if let Some((key, val)) = result.as_object().and_then(|m| m.iter().next()) {
        println!("{}: {}", key, format_amount(val));
        return;
    }

    println!("{}", format_amount(result));
}
