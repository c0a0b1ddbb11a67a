//! Localized attribute resolution.
//!
//! The localizable attributes (`label`, `hint`, `placeholder`, `endpoint`)
//! are either plain text throughout a schema or language maps throughout a
//! schema. [`verify_schema`] checks that in one pass before anything is
//! rendered; [`resolve`] then picks the text for the requested language.

use serde_json::Value;

use crate::error::{FormError, Result};
use crate::schema::{AttrValue, Schema};

/// Attributes whose value may be a language map.
pub const LOCALIZABLE_ATTRIBUTES: [&str; 4] = ["label", "hint", "placeholder", "endpoint"];

/// Classification of a localizable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Localization {
    /// A language map.
    Localized,
    /// A single string.
    Plain,
}

impl Localization {
    /// Classifies an attribute value.
    pub fn of(value: &AttrValue) -> Self {
        if value.as_localized().is_some() {
            Self::Localized
        } else {
            Self::Plain
        }
    }

    /// Returns the other classification.
    pub fn opposite(self) -> Self {
        match self {
            Self::Localized => Self::Plain,
            Self::Plain => Self::Localized,
        }
    }
}

impl std::fmt::Display for Localization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Localized => write!(f, "localized"),
            Self::Plain => write!(f, "non-localized"),
        }
    }
}

/// Returns whether a key names a localizable attribute.
pub fn is_localizable(key: &str) -> bool {
    LOCALIZABLE_ATTRIBUTES.contains(&key)
}

/// Returns whether a JSON value is a language map: an object whose every
/// value is a string.
pub fn is_localized(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|map| map.values().all(Value::is_string))
}

/// Resolves an attribute value against a language.
///
/// Plain values are returned as text whatever the language. Language maps
/// need a language that is one of their keys.
pub fn resolve(field: &str, value: &AttrValue, lang: Option<&str>) -> Result<String> {
    match value {
        AttrValue::Localized(localized) => {
            let lang = lang.ok_or(FormError::MissingLanguage)?;
            localized
                .get(lang)
                .map(str::to_string)
                .ok_or_else(|| FormError::UnknownLanguage {
                    lang: lang.to_string(),
                    field: field.to_string(),
                    available: localized.languages().map(str::to_string).collect(),
                })
        }
        other => Ok(other.to_text().unwrap_or_default()),
    }
}

/// Checks the localization invariant over the whole schema.
///
/// The first localizable value sets the schema's classification and every
/// other one must match it. A localized schema also needs a language that
/// every language map provides. Returns `None` when the schema has no
/// localizable values.
pub fn verify_schema(schema: &Schema, lang: Option<&str>) -> Result<Option<Localization>> {
    let mut classification: Option<Localization> = None;
    let mut confirmed: Vec<String> = Vec::new();

    for field in schema.fields() {
        for (_, value) in field.attrs().filter(|(key, _)| is_localizable(key)) {
            let found = Localization::of(value);
            match classification {
                None => classification = Some(found),
                Some(expected) if expected != found => {
                    return Err(FormError::MixedLocalization {
                        field: field.name.clone(),
                        found,
                        confirmed,
                    });
                }
                Some(_) => {}
            }
            if confirmed.last() != Some(&field.name) {
                confirmed.push(field.name.clone());
            }
        }
    }

    if classification == Some(Localization::Localized) {
        let lang = lang.ok_or(FormError::MissingLanguage)?;
        for field in schema.fields() {
            for (_, value) in field.attrs().filter(|(key, _)| is_localizable(key)) {
                resolve(&field.name, value, Some(lang))?;
            }
        }
    }

    Ok(classification)
}
