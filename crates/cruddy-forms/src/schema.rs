//! Form schema definitions.
//!
//! A [`Schema`] is an ordered list of [`FieldDef`]s plus the set of required
//! field names. Each field keeps its attributes as declaration-ordered
//! `(key, value)` entries: the same entries drive both the rendered markup
//! and the validation keywords (`minLength`, `pattern`, ...).

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{FormError, Result};
use crate::i18n;

/// The value type a field holds once submitted data is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// A string value.
    String,
    /// A boolean value (checkboxes).
    Boolean,
    /// Any JSON number.
    Number,
    /// A whole number.
    Integer,
}

impl FieldType {
    /// Parses a schema `type` marker.
    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "string" => Some(Self::String),
            "boolean" => Some(Self::Boolean),
            "number" => Some(Self::Number),
            "integer" => Some(Self::Integer),
            _ => None,
        }
    }

    /// Returns the schema `type` marker.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::Integer => "integer",
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A string expressed per language, keyed by language code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalizedString {
    translations: BTreeMap<String, String>,
}

impl LocalizedString {
    /// Creates an empty localized string.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to add a translation.
    #[must_use]
    pub fn with(mut self, lang: impl Into<String>, text: impl Into<String>) -> Self {
        self.translations.insert(lang.into(), text.into());
        self
    }

    /// Returns the translation for a language.
    pub fn get(&self, lang: &str) -> Option<&str> {
        self.translations.get(lang).map(String::as_str)
    }

    /// Returns the available language codes.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.translations.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for LocalizedString {
    fn from(entries: [(K, V); N]) -> Self {
        Self {
            translations: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// The value of a field attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// Plain text.
    Text(String),
    /// Per-language text.
    Localized(LocalizedString),
    /// A number, rendered with its JSON representation.
    Number(serde_json::Number),
    /// A flag. `true` renders as a boolean attribute, `false` is dropped.
    Bool(bool),
}

impl AttrValue {
    /// Returns the localized value, if this is one.
    pub fn as_localized(&self) -> Option<&LocalizedString> {
        match self {
            Self::Localized(l) => Some(l),
            _ => None,
        }
    }

    /// Coerces a non-localized value to its string form.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s.clone()),
            Self::Number(n) => Some(number_text(n)),
            Self::Bool(b) => Some(b.to_string()),
            Self::Localized(_) => None,
        }
    }

    /// Returns the value as a non-negative integer.
    pub fn as_usize(&self) -> Option<usize> {
        match self {
            Self::Number(n) => n.as_u64().and_then(|v| usize::try_from(v).ok()),
            Self::Text(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Returns the value as a float.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            Self::Text(s) => s.parse().ok(),
            _ => None,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for AttrValue {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<i32> for AttrValue {
    fn from(n: i32) -> Self {
        Self::Number(n.into())
    }
}

impl From<u32> for AttrValue {
    fn from(n: u32) -> Self {
        Self::Number(n.into())
    }
}

impl From<usize> for AttrValue {
    fn from(n: usize) -> Self {
        Self::Number(n.into())
    }
}

impl From<f64> for AttrValue {
    fn from(n: f64) -> Self {
        serde_json::Number::from_f64(n).map_or_else(|| Self::Text(n.to_string()), Self::Number)
    }
}

/// Writes a number the way it reads in markup: whole floats lose their `.0`.
fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.is_finite() => format!("{f:.0}"),
        _ => n.to_string(),
    }
}

impl From<LocalizedString> for AttrValue {
    fn from(l: LocalizedString) -> Self {
        Self::Localized(l)
    }
}

/// Definition of a single form field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    /// Field name.
    pub name: String,
    /// Value type of the field.
    pub field_type: FieldType,
    attrs: Vec<(String, AttrValue)>,
}

impl FieldDef {
    /// Creates a field holding a value of the given type.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            attrs: Vec::new(),
        }
    }

    /// Creates a string field.
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::String)
    }

    /// Creates a boolean field.
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Boolean)
    }

    /// Creates a number field.
    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Number)
    }

    /// Creates an integer field.
    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Integer)
    }

    /// Sets an attribute. Re-setting a key keeps its original position.
    #[must_use]
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Sets an attribute in place.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.attrs.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.attrs.push((key, value));
        }
    }

    /// Sets the element tag (`input`, `textarea`).
    #[must_use]
    pub fn element(self, element: impl Into<String>) -> Self {
        self.attr("element", element.into())
    }

    /// Sets the input type (`text`, `email`, `password`, ...).
    #[must_use]
    pub fn input_type(self, input_type: impl Into<String>) -> Self {
        self.attr("inputType", input_type.into())
    }

    /// Sets the label text.
    #[must_use]
    pub fn label(self, label: impl Into<AttrValue>) -> Self {
        self.attr("label", label)
    }

    /// Sets the hint text.
    #[must_use]
    pub fn hint(self, hint: impl Into<AttrValue>) -> Self {
        self.attr("hint", hint)
    }

    /// Sets the placeholder.
    #[must_use]
    pub fn placeholder(self, placeholder: impl Into<AttrValue>) -> Self {
        self.attr("placeholder", placeholder)
    }

    /// Sets the remote validation endpoint.
    #[must_use]
    pub fn endpoint(self, endpoint: impl Into<AttrValue>) -> Self {
        self.attr("endpoint", endpoint)
    }

    /// Sets the initial element value.
    #[must_use]
    pub fn element_value(self, value: impl Into<String>) -> Self {
        self.attr("elementValue", value.into())
    }

    /// Sets the minimum string length.
    #[must_use]
    pub fn min_length(self, min: usize) -> Self {
        self.attr("minLength", min)
    }

    /// Sets the maximum string length.
    #[must_use]
    pub fn max_length(self, max: usize) -> Self {
        self.attr("maxLength", max)
    }

    /// Sets the pattern the value must match.
    #[must_use]
    pub fn pattern(self, pattern: impl Into<String>) -> Self {
        self.attr("pattern", pattern.into())
    }

    /// Sets a boolean attribute.
    #[must_use]
    pub fn flag(self, name: impl Into<String>) -> Self {
        self.attr(name, true)
    }

    /// Returns the attributes in declaration order.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns an attribute value.
    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.attrs.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

/// An ordered object schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    fields: Vec<FieldDef>,
    required: Vec<String>,
}

impl Schema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a required field.
    #[must_use]
    pub fn field(mut self, field: FieldDef) -> Self {
        self.required.push(field.name.clone());
        self.fields.push(field);
        self
    }

    /// Adds an optional field.
    #[must_use]
    pub fn optional(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Returns the field definitions in declaration order.
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Returns a field by name.
    pub fn get(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns the names of the required fields.
    pub fn required(&self) -> &[String] {
        &self.required
    }

    /// Returns whether a field is required.
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }

    /// Loads a schema from a JSON object schema document.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::try_from(&value)
    }
}

impl TryFrom<&Value> for Schema {
    type Error = FormError;

    fn try_from(value: &Value) -> Result<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| FormError::InvalidSchema("expected a JSON object".to_string()))?;

        if let Some(ty) = obj.get("type") {
            if ty != "object" {
                return Err(FormError::InvalidSchema(format!(
                    "expected type \"object\", found {ty}"
                )));
            }
        }

        let properties = obj
            .get("properties")
            .and_then(Value::as_object)
            .ok_or_else(|| FormError::InvalidSchema("missing \"properties\" object".to_string()))?;

        let required = match obj.get("required") {
            None => Vec::new(),
            Some(Value::Array(names)) => names
                .iter()
                .map(|n| {
                    n.as_str().map(str::to_string).ok_or_else(|| {
                        FormError::InvalidSchema("\"required\" must list field names".to_string())
                    })
                })
                .collect::<Result<Vec<_>>>()?,
            Some(_) => {
                return Err(FormError::InvalidSchema(
                    "\"required\" must be an array".to_string(),
                ))
            }
        };

        let fields = properties
            .iter()
            .map(|(name, props)| field_from_json(name, props))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { fields, required })
    }
}

fn field_from_json(name: &str, props: &Value) -> Result<FieldDef> {
    let props = props.as_object().ok_or_else(|| {
        FormError::InvalidSchema(format!("property '{name}' must be an object"))
    })?;

    let field_type = props
        .get("type")
        .and_then(Value::as_str)
        .and_then(FieldType::from_name)
        .ok_or_else(|| {
            FormError::InvalidSchema(format!(
                "property '{name}' must have a string, boolean, number or integer type"
            ))
        })?;

    let mut field = FieldDef::new(name, field_type);
    for (key, value) in props {
        if key == "type" {
            continue;
        }
        let attr = match value {
            Value::String(s) => AttrValue::Text(s.clone()),
            Value::Bool(b) => AttrValue::Bool(*b),
            Value::Number(n) => AttrValue::Number(n.clone()),
            Value::Object(map) if i18n::is_localized(value) => AttrValue::Localized(
                map.iter()
                    .filter_map(|(lang, text)| Some((lang.clone(), text.as_str()?.to_string())))
                    .fold(LocalizedString::new(), |l, (lang, text)| l.with(lang, text)),
            ),
            _ => {
                return Err(FormError::InvalidAttribute {
                    field: name.to_string(),
                    attribute: key.clone(),
                    reason: format!("unsupported value {value}"),
                })
            }
        };
        field.set(key.clone(), attr);
    }

    Ok(field)
}
