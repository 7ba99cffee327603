//! Decoding of raw JSON input.
//!
//! Untyped objects coming from outside (HTTP bodies, fixtures) are turned
//! into typed inputs here. Decode failures are reported as
//! [`ValidationErrors`] so callers see one error shape for both bad JSON
//! and broken field rules.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tb_core::error::ValidationErrors;

type DecodeError = serde_path_to_error::Error<serde_json::Error>;

/// Decode `value` into `T`, applying serde defaults
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ValidationErrors> {
    serde_path_to_error::deserialize(value).map_err(|e| describe(&e))
}

/// Decode a JSON string into `T`
pub fn decode_str<T: DeserializeOwned>(input: &str) -> Result<T, ValidationErrors> {
    let mut deserializer = serde_json::Deserializer::from_str(input);
    let decoded = serde_path_to_error::deserialize(&mut deserializer).map_err(|e| describe(&e))?;
    deserializer
        .end()
        .map_err(|e| base_error(strip_position(&e.to_string())))?;
    Ok(decoded)
}

/// Key the failure on the field it happened at.
///
/// A missing field is reported against the struct that lacks it, so its
/// name is taken from the message and appended to that path.
fn describe(error: &DecodeError) -> ValidationErrors {
    let message = error.inner().to_string();
    let message = strip_position(&message);
    let path = error.path().to_string();
    let at = (path != ".").then_some(path.as_str());

    if let Some(field) = quoted_after(message, "missing field ") {
        let field = match at {
            Some(parent) => format!("{}.{}", parent, field),
            None => field.to_string(),
        };
        return ValidationErrors::single(field, "can't be blank");
    }

    let constraint = match quoted_after(message, "unknown variant ") {
        Some(variant) => {
            let expected = message
                .split_once("expected ")
                .map(|(_, rest)| rest)
                .unwrap_or("a known value");
            format!("'{}' is not included in the list, expected {}", variant, expected)
        }
        None => format!("is invalid ({})", message),
    };

    match at {
        Some(field) => ValidationErrors::single(field, constraint),
        None => base_error(message),
    }
}

fn base_error(message: &str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add_base(message.to_string());
    errors
}

/// serde_json appends " at line X column Y" to string parse errors
fn strip_position(message: &str) -> &str {
    match message.rfind(" at line ") {
        Some(index) => &message[..index],
        None => message,
    }
}

/// Text between the first pair of backticks following `prefix`
fn quoted_after<'a>(message: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = message.strip_prefix(prefix)?;
    let rest = rest.strip_prefix('`')?;
    let end = rest.find('`')?;
    Some(&rest[..end])
}
