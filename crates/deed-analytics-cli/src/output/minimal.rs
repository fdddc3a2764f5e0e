use serde_json::Value;

use super::display_value;

/// Print just the headline figure from the output.
///
/// Heuristic: look for the well-known result fields in order of priority,
/// then fall back to the first field in the result object.
pub fn print_minimal(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    // Headline field per analysis, most decisive first
    let priority_keys = [
        "verdict",
        "risk_level",
        "roi_percent",
        "net_profit",
        "total_cost",
        "max_offer_70_percent_rule",
    ];

    if let Value::Object(map) = result {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", display_value(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, display_value(val));
            return;
        }
    }

    println!("{}", display_value(result));
}
