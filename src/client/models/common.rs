//! Shared model primitives

use std::fmt;

use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Remote resource identifier.
///
/// Aikido identifiers are numeric, but tool callers sometimes pass them as
/// strings. Either form is accepted and rendered verbatim in URLs and queries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Number(n) => write!(f, "{}", n),
            ResourceId::Text(s) => f.write_str(s),
        }
    }
}

impl ResourceId {
    /// The id as a single URL path segment.
    ///
    /// `None` for text ids that are empty, dot segments, or contain
    /// characters that would change the request path or query.
    pub fn path_segment(&self) -> Option<String> {
        match self {
            ResourceId::Number(n) => Some(n.to_string()),
            ResourceId::Text(s) => {
                let s = s.trim();
                let unsafe_char = |c: char| {
                    matches!(c, '/' | '\\' | '?' | '#' | '%') || c.is_whitespace() || c.is_control()
                };
                if s.is_empty() || s == "." || s == ".." || s.contains(unsafe_char) {
                    None
                } else {
                    Some(s.to_string())
                }
            }
        }
    }
}

impl From<i64> for ResourceId {
    fn from(id: i64) -> Self {
        ResourceId::Number(id)
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        ResourceId::Text(id.to_string())
    }
}

/// Response of a list endpoint.
///
/// The API documents these endpoints as returning JSON arrays. Any other
/// shape, or an array whose items do not decode, is kept verbatim in `Other`
/// so callers can pass it through.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Items(Vec<T>),
    Other(Value),
}

impl<T> Listing<T> {
    /// Items of an array response, if the response was an array
    #[cfg(test)]
    pub fn items(&self) -> Option<&[T]> {
        match self {
            Listing::Items(items) => Some(items),
            Listing::Other(_) => None,
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Listing<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        if !value.is_array() {
            return Ok(Listing::Other(value));
        }

        match Vec::<T>::deserialize(&value) {
            Ok(items) => Ok(Listing::Items(items)),
            Err(err) => {
                warn!("List response items did not decode ({}); passing it through", err);
                Ok(Listing::Other(value))
            }
        }
    }
}

/// Field deserializers that tolerate the loose typing of API payloads.
///
/// Explicit `null`s become the default, numbers sent as strings are parsed,
/// and values of an unexpected shape are dropped instead of failing the record.
pub mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use super::ResourceId;

    /// Any scalar as text; `null`, arrays and objects become `None`.
    pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
    }

    /// Like [`string`], with an empty string for anything missing.
    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        string(deserializer).map(Option::unwrap_or_default)
    }

    /// Integers, floats with no fraction, and numeric strings.
    pub fn integer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                    .map(|f| f as i64)
            }),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }

    /// Numeric or string identifier; anything else becomes `None`.
    pub fn resource_id<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<ResourceId>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => Some(match n.as_i64() {
                Some(id) => ResourceId::Number(id),
                None => ResourceId::Text(n.to_string()),
            }),
            Value::String(s) => Some(ResourceId::Text(s)),
            _ => None,
        })
    }

    /// Array of `T`, skipping entries that do not decode; `null` is empty.
    pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => items
                .into_iter()
                .filter(|item| !item.is_null())
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
            _ => Vec::new(),
        })
    }
}
