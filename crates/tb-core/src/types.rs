//! Common types used throughout Taskboard RS

use serde::{Deserialize, Deserializer};

/// Deserializer for patch fields that distinguish "absent" from "null".
///
/// Use with `#[serde(default, deserialize_with = "tb_core::deserialize_some")]`
/// on an `Option<Option<T>>`: a missing key stays `None`, an explicit `null`
/// becomes `Some(None)`.
pub fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Apply a nullable patch value onto a field
pub fn apply_nullable<T>(field: &mut Option<T>, patch: Option<Option<T>>) {
    if let Some(value) = patch {
        *field = value;
    }
}
