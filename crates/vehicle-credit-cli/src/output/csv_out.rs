use serde_json::Value;
use std::io;

use super::{flatten, format_scalar};

/// Write output as a two-column `field,value` CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => {
            let body = match map.get("result") {
                Some(Value::Object(result)) => result,
                _ => map,
            };
            let _ = wtr.write_record(["field", "value"]);
            for (key, val) in flatten(body) {
                let _ = wtr.write_record([key, format_scalar(&val)]);
            }
        }
        _ => {
            let _ = wtr.write_record([format_scalar(value)]);
        }
    }

    let _ = wtr.flush();
}
