//! Schema introspection.
//!
//! [`HtmlBuilder`] turns each schema field into an [`ElementData`] record,
//! the normalized input of the markup functions in [`crate::markup`].

use tracing::{debug, trace};

use crate::attrs::Attributes;
use crate::error::{FormError, Result};
use crate::i18n;
use crate::options::FormOptions;
use crate::schema::{AttrValue, FieldDef, Schema};

/// Attributes seeded onto text-editable elements when absent.
pub const TEXT_INPUT_DEFAULTS: [(&str, &str); 6] = [
    ("autocapitalize", "off"),
    ("autocomplete", "off"),
    ("autocorrect", "off"),
    ("placeholder", ""),
    ("spellcheck", "false"),
    ("value", ""),
];

/// Normalized description of one form element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// Boolean attribute names, rendered without a value.
    pub boolean_attributes: Vec<String>,
    /// Element tag.
    pub element: String,
    /// Initial value declared by the schema.
    pub element_value: Option<String>,
    /// Hint text shown below the element.
    pub hint: Option<String>,
    /// Element id.
    pub id: String,
    /// Input type.
    pub input_type: String,
    /// Label text.
    pub label: String,
    /// Field name.
    pub name: String,
    /// String attributes, in insertion order.
    pub string_attributes: Attributes,
}

impl ElementData {
    /// Returns whether this element is a checkbox input.
    pub fn is_checkbox(&self) -> bool {
        self.element == "input" && self.input_type == "checkbox"
    }
}

/// Merges the text-input defaults into `attributes`.
///
/// Only textareas and non-checkbox inputs get defaults, and only for keys
/// that are not set yet.
pub fn apply_default_attributes(
    element: &str,
    input_type: &str,
    mut attributes: Attributes,
) -> Attributes {
    if element == "textarea" || (element == "input" && input_type != "checkbox") {
        for (key, value) in TEXT_INPUT_DEFAULTS {
            attributes.set_default(key, value);
        }
    }
    attributes
}

/// Builds element data from a schema.
#[derive(Debug, Clone)]
pub struct HtmlBuilder {
    schema: Schema,
    id_suffix: String,
}

impl HtmlBuilder {
    /// Creates a builder for a schema.
    pub fn new(schema: Schema, options: &FormOptions) -> Self {
        Self {
            schema,
            id_suffix: options.id_suffix.clone().unwrap_or_default(),
        }
    }

    /// Returns the schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Extracts one [`ElementData`] per schema field, in declaration order.
    ///
    /// The localization invariant is checked for the whole schema first, so
    /// an error leaves nothing half-built.
    pub fn element_data(&self, lang: Option<&str>) -> Result<Vec<ElementData>> {
        i18n::verify_schema(&self.schema, lang)?;

        let data = self
            .schema
            .fields()
            .iter()
            .map(|field| self.field_data(field, lang))
            .collect::<Result<Vec<_>>>()?;

        debug!(fields = data.len(), lang = ?lang, "Built element data from schema");
        Ok(data)
    }

    fn field_data(&self, field: &FieldDef, lang: Option<&str>) -> Result<ElementData> {
        let name = field.name.as_str();

        let mut string_attributes = Attributes::new();
        string_attributes.set("name", name);
        let id = format!("{name}_{}", self.id_suffix);
        string_attributes.set("id", &id);

        let mut boolean_attributes = Vec::new();
        if self.schema.is_required(name) {
            boolean_attributes.push("required".to_string());
        }

        let mut element = None;
        let mut element_value = None;
        let mut hint = None;
        let mut input_type = None;
        let mut label = None;

        for (key, value) in field.attrs() {
            match key {
                "element" => element = Some(plain_text(name, key, value)?),
                "hint" => hint = Some(i18n::resolve(name, value, lang)?),
                "label" => label = Some(i18n::resolve(name, value, lang)?),
                "placeholder" => string_attributes.set(key, i18n::resolve(name, value, lang)?),
                "endpoint" => {
                    string_attributes.set("data-endpoint", i18n::resolve(name, value, lang)?);
                }
                "elementValue" => {
                    let text = plain_text(name, key, value)?;
                    string_attributes.set("value", &text);
                    element_value = Some(text);
                }
                "inputType" => {
                    let text = plain_text(name, key, value)?;
                    string_attributes.set("type", &text);
                    input_type = Some(text);
                }
                "type" => {}
                _ => match value {
                    AttrValue::Bool(true) => boolean_attributes.push(key.to_string()),
                    AttrValue::Bool(false) => {}
                    other => string_attributes.set(key, plain_text(name, key, other)?),
                },
            }
        }

        let element = element.ok_or_else(|| FormError::MissingElement {
            field: name.to_string(),
        })?;
        let input_type = input_type.ok_or_else(|| FormError::MissingInputType {
            field: name.to_string(),
        })?;
        let label = label
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| capitalize(name));

        let string_attributes = apply_default_attributes(&element, &input_type, string_attributes);

        trace!(field = name, element = %element, input_type = %input_type, "Built element data");
        Ok(ElementData {
            boolean_attributes,
            element,
            element_value,
            hint,
            id,
            input_type,
            label,
            name: name.to_string(),
            string_attributes,
        })
    }
}

fn plain_text(field: &str, key: &str, value: &AttrValue) -> Result<String> {
    value.to_text().ok_or_else(|| FormError::InvalidAttribute {
        field: field.to_string(),
        attribute: key.to_string(),
        reason: "only label, hint, placeholder and endpoint may be localized".to_string(),
    })
}

/// Uppercases the first character of a field name.
fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
