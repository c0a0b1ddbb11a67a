//! Submitted form data and its conversion to typed values.

use serde_json::{Map, Number, Value};
use tracing::debug;

use crate::schema::{FieldType, Schema};

/// Submitted `(name, value)` pairs, in submission order.
///
/// A name may appear several times: a checked checkbox submits both its
/// hidden `off` input and its own value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    entries: Vec<(String, String)>,
}

impl FormData {
    /// Creates empty form data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Replaces every value of `name` with a single value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.entries.retain(|(k, _)| *k != name);
        self.entries.push((name, value.into()));
    }

    /// Builder method to append a value.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.append(name, value);
        self
    }

    /// Returns the first value of `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns every value of `name`, in submission order.
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Iterates over all pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parses an `application/x-www-form-urlencoded` body.
    pub fn from_urlencoded(body: &str) -> Self {
        let entries = body
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let mut parts = pair.splitn(2, '=');
                let key = parts.next().unwrap_or_default();
                let value = parts.next().unwrap_or_default();
                (urlencoding_decode(key), urlencoding_decode(value))
            })
            .collect();
        Self { entries }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Decodes `+` and `%XX` escapes.
fn urlencoding_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let byte = s
                    .get(i + 1..i + 3)
                    .and_then(|hex| u8::from_str_radix(hex, 16).ok());
                if let Some(byte) = byte {
                    decoded.push(byte);
                    i += 3;
                    continue;
                }
                decoded.push(b'%');
            }
            b'+' => decoded.push(b' '),
            b => decoded.push(b),
        }
        i += 1;
    }

    String::from_utf8_lossy(&decoded).into_owned()
}

/// Converts submitted values to typed JSON values, one entry per schema field
/// that received at least one value.
///
/// A single submission becomes a scalar, several become an array. Values
/// that cannot be coerced are kept as strings so validation reports them.
pub fn parse_form_fields(form_data: &FormData, schema: &Schema) -> Map<String, Value> {
    let mut parsed = Map::new();

    for field in schema.fields() {
        let mut coerced: Vec<Value> = form_data
            .get_all(&field.name)
            .into_iter()
            .filter_map(|raw| coerce(field.field_type, raw))
            .collect();

        let value = match coerced.len() {
            0 => continue,
            1 => coerced.swap_remove(0),
            _ => Value::Array(coerced),
        };
        parsed.insert(field.name.clone(), value);
    }

    let ignored = form_data
        .iter()
        .filter(|(name, _)| schema.get(name).is_none())
        .count();
    if ignored > 0 {
        debug!(ignored, "Ignored submitted values not named by the schema");
    }

    parsed
}

/// Collapses a checkbox's hidden and visible submissions.
///
/// An array holding both `false` and `true` means the box was checked.
pub fn collapse_checkbox_pairs(data: Map<String, Value>) -> Map<String, Value> {
    data.into_iter()
        .map(|(key, value)| match value {
            Value::Array(items)
                if items.contains(&Value::Bool(false)) && items.contains(&Value::Bool(true)) =>
            {
                (key, Value::Bool(true))
            }
            other => (key, other),
        })
        .collect()
}

fn coerce(field_type: FieldType, raw: &str) -> Option<Value> {
    match field_type {
        FieldType::String => Some(Value::String(raw.to_string())),
        FieldType::Boolean => Some(match raw {
            "on" | "true" | "1" => Value::Bool(true),
            "off" | "false" | "0" | "" => Value::Bool(false),
            other => Value::String(other.to_string()),
        }),
        FieldType::Integer | FieldType::Number => {
            let raw = raw.trim();
            if raw.is_empty() {
                return None;
            }
            Some(parse_number(raw).map_or_else(|| Value::String(raw.to_string()), Value::Number))
        }
    }
}

fn parse_number(raw: &str) -> Option<Number> {
    raw.parse::<i64>()
        .map(Number::from)
        .ok()
        .or_else(|| raw.parse::<f64>().ok().and_then(Number::from_f64))
}
