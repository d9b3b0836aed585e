//! Lookup response parsing.
//!
//! Backends answer in one of two shapes: a bare sentinel (`1` / `0`,
//! `true` / `false`) or a JSON object with a boolean `exists` field.

use serde_json::Value;
use tuning_core::error::EntitlementError;

/// Interprets a lookup response body.
///
/// # Errors
///
/// Returns `EntitlementError::MalformedResponse` if the body is neither a
/// recognised sentinel nor an object carrying a boolean `exists`.
pub fn parse_lookup_body(body: &str) -> Result<bool, EntitlementError> {
    let trimmed = body.trim();
    match trimmed {
        "1" | "true" => return Ok(true),
        "0" | "false" => return Ok(false),
        _ => {}
    }

    let value: Value = serde_json::from_str(trimmed)
        .map_err(|_| EntitlementError::MalformedResponse(truncate(trimmed)))?;
    match value {
        Value::Bool(entitled) => Ok(entitled),
        Value::String(ref s) if s == "1" => Ok(true),
        Value::String(ref s) if s == "0" => Ok(false),
        Value::Object(ref map) => match map.get("exists") {
            Some(Value::Bool(entitled)) => Ok(*entitled),
            _ => Err(EntitlementError::MalformedResponse(truncate(trimmed))),
        },
        _ => Err(EntitlementError::MalformedResponse(truncate(trimmed))),
    }
}

fn truncate(body: &str) -> String {
    body.chars().take(120).collect()
}
