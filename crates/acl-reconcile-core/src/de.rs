//! Deserialization helpers shared by the document types.

use serde::{Deserialize, Deserializer};

/// Decode `null` as the type's default.
///
/// Pair with `#[serde(default)]` so a missing key behaves the same way.
/// Metadata writers have historically emitted `null` for empty lists.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
