//! Argument formatting for console output.
//!
//! Pure and deterministic: a list of script values maps to a list of text
//! tokens, one per value. Strings pass through verbatim (no quoting); every
//! other shape gets its structural JSON serialization so composite values
//! print as readable nested text instead of an opaque type tag. Both console
//! entry points go through [`format_args`], so their output can never diverge
//! for the same input.

use serde_json::Value;

/// Token substituted for a value that cannot be serialized to text.
///
/// Substitution is per value: the rest of the line still formats normally and
/// exactly one complete line reaches the host. A partially formatted line is
/// never emitted.
pub const UNSERIALIZABLE_TOKEN: &str = "<unserializable>";

/// Nesting ceiling for structural serialization, matching serde_json's parse
/// recursion limit. Values nested deeper than this format as
/// [`UNSERIALIZABLE_TOKEN`].
const MAX_FORMAT_DEPTH: usize = 128;

/// Format a value list into one space-joined line (no trailing newline).
#[must_use]
pub fn format_args(values: &[Value]) -> String {
    let tokens: Vec<String> = values.iter().map(token).collect();
    tokens.join(" ")
}

fn token(value: &Value) -> String {
    if let Value::String(text) = value {
        return text.clone();
    }
    if exceeds_depth(value, MAX_FORMAT_DEPTH) {
        return UNSERIALIZABLE_TOKEN.to_string();
    }
    match serde_json::to_string(value) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!(%e, "structural serialization failed");
            UNSERIALIZABLE_TOKEN.to_string()
        }
    }
}

fn exceeds_depth(value: &Value, budget: usize) -> bool {
    match value {
        Value::Array(_) | Value::Object(_) if budget == 0 => true,
        Value::Array(items) => items.iter().any(|v| exceeds_depth(v, budget - 1)),
        Value::Object(map) => map.values().any(|v| exceeds_depth(v, budget - 1)),
        _ => false,
    }
}
