//! JSON output helpers.
//!
//! `--human` keeps the backend payload intact and adds readable siblings:
//! `<key>_human` for byte counts and `<key>_local` for timestamps.

use netwatch_client::util::format::{Locale, format_bytes, format_timestamp};
use serde_json::Value;
use time::UtcOffset;

use crate::CliError;

const BYTE_KEYS: &[&str] = &["length", "total", "used", "free", "available"];

pub(crate) fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

fn is_byte_key(key: &str) -> bool {
    key.contains("bytes") || key.ends_with("_total") || key.ends_with("_used") || BYTE_KEYS.contains(&key)
}

fn is_time_key(key: &str) -> bool {
    key == "timestamp" || key == "last_seen" || key.ends_with("_at")
}

/// Annotate byte-valued and timestamp-valued fields, recursively.
pub(crate) fn humanize(value: &mut Value, locale: Locale, offset: UtcOffset) {
    match value {
        Value::Object(map) => {
            let mut extra = Vec::new();
            for (key, child) in map.iter_mut() {
                match child {
                    Value::Number(n) if is_byte_key(key) => {
                        if let Some(bytes) = n.as_f64() {
                            extra.push((format!("{key}_human"), Value::String(format_bytes(bytes))));
                        }
                    }
                    Value::String(raw) if is_time_key(key) => {
                        if let Some(local) = format_timestamp(raw, locale, offset) {
                            extra.push((format!("{key}_local"), Value::String(local)));
                        }
                    }
                    _ => humanize(child, locale, offset),
                }
            }
            map.extend(extra);
        }
        Value::Array(items) => {
            for item in items {
                humanize(item, locale, offset);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
