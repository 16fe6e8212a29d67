//! Forgiving decoders for fields the collection service stores as free text.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

/// Decode a string, a number, or `null` into text. `null` becomes "".
pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<TextOrNumber>::deserialize(deserializer)?;
    Ok(match value {
        None => String::new(),
        Some(TextOrNumber::Text(s)) => s,
        Some(TextOrNumber::Integer(n)) => n.to_string(),
        Some(TextOrNumber::Float(n)) => n.to_string(),
        Some(TextOrNumber::Bool(b)) => b.to_string(),
    })
}

/// Decode an array, treating `null` as empty.
pub(crate) fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
