use serde_json::Value;

use super::format_scalar;

/// Print just the key answer value from the output.
///
/// Heuristic: look for well-known result fields in order of priority,
/// then fall back to the first field in the result object.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    println!("{}", pick_answer(result_obj));
}

fn pick_answer(result: &Value) -> String {
    // Solver output nests the answer under "best"
    if let Some(dp) = result.pointer("/best/down_payment_percent_actual") {
        return format_scalar(dp);
    }

    let priority_keys = [
        "monthly_installment",
        "monthly_payment",
        "default_label",
        "tenors",
    ];

    if let Value::Object(map) = result {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    return format_scalar(val);
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, format_scalar(val));
        }
    }

    format_scalar(result)
}
