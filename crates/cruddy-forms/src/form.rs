//! The form: rendering and validation over one schema.

use std::collections::HashMap;

use serde_json::Value;

use crate::builder::HtmlBuilder;
use crate::error::Result;
use crate::form_data::FormData;
use crate::markup;
use crate::options::FormOptions;
use crate::schema::Schema;
use crate::validation::{ValidationResult, Validator};

const DEFAULT_COMPONENT_ELEMENT: &str = "cruddy-form";
const DEFAULT_ERROR_HEADING: &str = "Validation Errors";

/// A form built from a schema.
///
/// Rendering and validation share the schema, so the constraints shown to the
/// browser are the ones enforced on submission. Validation failures are
/// remembered and shown in the errors block of the next render.
#[derive(Debug)]
pub struct Form {
    builder: HtmlBuilder,
    validator: Validator,
    options: FormOptions,
    component_element: String,
    error_message: String,
    error_details: Vec<String>,
}

impl Form {
    /// Creates a form.
    ///
    /// Fails if a validation keyword of the schema cannot be compiled.
    pub fn new(schema: Schema, options: FormOptions) -> Result<Self> {
        let options = options.with_form_defaults();
        let validator = Validator::new(&schema)?;
        let builder = HtmlBuilder::new(schema, &options);

        Ok(Self {
            builder,
            validator,
            options,
            component_element: DEFAULT_COMPONENT_ELEMENT.to_string(),
            error_message: String::new(),
            error_details: Vec::new(),
        })
    }

    /// Sets the name of the element wrapping [`Form::render_component`].
    #[must_use]
    pub fn with_component_element(mut self, name: impl Into<String>) -> Self {
        self.component_element = name.into();
        self
    }

    /// Returns the component element name.
    pub fn component_element(&self) -> &str {
        &self.component_element
    }

    /// Returns the options, with defaults applied.
    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    /// Returns the schema.
    pub fn schema(&self) -> &Schema {
        self.builder.schema()
    }

    /// Returns the current error heading and details.
    pub fn error_message(&self) -> (&str, &[String]) {
        (&self.error_message, &self.error_details)
    }

    /// Renders the form.
    ///
    /// `values` is an object whose entries become the `value` of the field of
    /// the same name. `lang` picks the language of a localized schema.
    pub fn render(&self, values: Option<&Value>, lang: Option<&str>) -> Result<String> {
        let element_data = self.builder.element_data(lang)?;
        let supplied = supplied_values(values);

        let mut inputs = String::new();
        for mut data in element_data {
            if let Some(value) = supplied.get(&data.name) {
                data.string_attributes.set("value", value);
            }
            inputs.push_str(&markup::field_html(&data, &supplied, &self.options));
        }

        let fieldset = markup::fieldset_html(self.options.fieldset, self.options.legend.as_deref());
        let extra_html = self.options.extra_html.as_deref().unwrap_or_default();
        let errors = markup::errors_html(&self.error_message, &self.error_details);
        let submit = markup::submit_button_html(
            self.options.button_label.as_deref().unwrap_or("Submit"),
            None,
        );
        let form = markup::form_element_html(&self.options);

        Ok(format!(
            "{form}{}{extra_html}\n{inputs}\n{errors}{}{submit}\n</form>",
            fieldset.start, fieldset.end
        ))
    }

    /// Renders the form wrapped in the component element.
    pub fn render_component(&self, values: Option<&Value>, lang: Option<&str>) -> Result<String> {
        Ok(format!(
            "<{0}>{1}</{0}>",
            self.component_element,
            self.render(values, lang)?
        ))
    }

    /// Sets the errors block shown by the next render.
    pub fn set_error_message(&mut self, message: impl Into<String>, details: Vec<String>) {
        self.error_message = message.into();
        self.error_details = details;
    }

    /// Shows the errors of a failed validation on the next render. A valid
    /// result leaves the current message untouched.
    pub fn set_error_message_from_result(
        &mut self,
        result: &ValidationResult,
        heading: Option<&str>,
    ) {
        if !result.valid {
            self.set_error_message(
                heading.unwrap_or(DEFAULT_ERROR_HEADING),
                result.errors.clone(),
            );
        }
    }

    /// Validates submitted form data and records its errors.
    pub fn validate(&mut self, form_data: &FormData, heading: Option<&str>) -> ValidationResult {
        let result = self.validator.validate_form_data(form_data);
        self.set_error_message_from_result(&result, heading);
        result
    }

    /// Validates a JSON object and records its errors.
    pub fn validate_object(&mut self, data: &Value, heading: Option<&str>) -> ValidationResult {
        let result = self.validator.validate_object(data);
        self.set_error_message_from_result(&result, heading);
        result
    }
}

/// Stringifies supplied values, keyed by both the lower-cased and the
/// original name. The original name wins on collision.
fn supplied_values(values: Option<&Value>) -> HashMap<String, String> {
    let mut supplied = HashMap::new();
    let Some(Value::Object(values)) = values else {
        return supplied;
    };

    let texts: Vec<(&String, String)> = values
        .iter()
        .filter_map(|(key, value)| Some((key, value_text(value)?)))
        .collect();

    for (key, text) in &texts {
        supplied.insert(key.to_lowercase(), text.clone());
    }
    for (key, text) in texts {
        supplied.insert(key.clone(), text);
    }
    supplied
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Object(_) => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .map(|item| value_text(item).unwrap_or_default())
                .collect::<Vec<_>>()
                .join(","),
        ),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldDef;
    use serde_json::json;

    fn schema() -> Schema {
        Schema::new()
            .field(
                FieldDef::boolean("remember")
                    .element("input")
                    .input_type("checkbox")
                    .label("Remember me"),
            )
            .field(
                FieldDef::string("password")
                    .element("input")
                    .input_type("password")
                    .min_length(4),
            )
            .field(
                FieldDef::string("username")
                    .element("input")
                    .input_type("text")
                    .max_length(6),
            )
    }

    fn form() -> Form {
        Form::new(schema(), FormOptions::new()).unwrap()
    }

    #[test]
    fn test_render_assembly() {
        let html = form().render(None, None).unwrap();
        assert!(html.starts_with(r#"<form class="normform" method="post">"#));
        assert!(html.ends_with(
            "<div class=\"submit\"><input class=\"button\" type=\"submit\" value=\"Submit\"></div>\n</form>"
        ));
        assert!(html.contains(r#"<div class="password">"#));
        assert!(html.contains(r#"<div class="text">"#));
        assert!(html.contains(r#"<div class="checkbox">"#));
        assert!(!html.contains(r#"<div class="error">"#));
    }

    #[test]
    fn test_render_overlays_values() {
        let values = json!({"username": "jane", "remember": true, "Password": "secret"});
        let html = form().render(Some(&values), None).unwrap();
        assert!(html.contains(r#"value="jane""#));
        assert!(html.contains(r#"value="secret""#));
        assert!(html.contains(" checked >"));
    }

    #[test]
    fn test_supplied_values_prefer_original_case() {
        let supplied = supplied_values(Some(&json!({"Name": "a", "name": "b"})));
        assert_eq!(supplied.get("name").map(String::as_str), Some("b"));
        assert_eq!(supplied.get("Name").map(String::as_str), Some("a"));

        let supplied = supplied_values(Some(&json!({"n": null, "o": {}, "l": [1, "x"], "b": false})));
        assert_eq!(supplied.get("n"), None);
        assert_eq!(supplied.get("o"), None);
        assert_eq!(supplied.get("l").map(String::as_str), Some("1,x"));
        assert_eq!(supplied.get("b").map(String::as_str), Some("false"));
    }

    #[test]
    fn test_exact_key_wins_in_either_order() {
        for values in [
            json!({"username": "exact", "Username": "other"}),
            json!({"Username": "other", "username": "exact"}),
        ] {
            let supplied = supplied_values(Some(&values));
            assert_eq!(supplied.get("username").map(String::as_str), Some("exact"));
            assert_eq!(supplied.get("Username").map(String::as_str), Some("other"));

            let html = form().render(Some(&values), None).unwrap();
            assert!(html.contains(r#"value="exact""#));
            assert!(!html.contains(r#"value="other""#));
        }
    }

    #[test]
    fn test_render_component() {
        let form = form().with_component_element("login-form");
        let html = form.render_component(None, None).unwrap();
        assert!(html.starts_with("<login-form><form"));
        assert!(html.ends_with("</form></login-form>"));
    }

    #[test]
    fn test_validation_errors_are_rendered() {
        let mut form = form();
        let data = FormData::new().with("password", "123").with("username", "jane");
        let result = form.validate(&data, None);
        assert!(!result.valid);

        let html = form.render(None, None).unwrap();
        assert!(html.contains(
            "<div class=\"error\">\n<span>Validation Errors:</span>\n<ul>\n<li>\npassword: Expected string length greater or equal to 4</li>\n</ul>\n</div><div class=\"submit\">"
        ));
    }

    #[test]
    fn test_valid_result_keeps_previous_message() {
        let mut form = form();
        form.set_error_message("Login failed", vec![]);
        let result = form.validate_object(&json!({"password": "secret", "username": "jane"}), Some("Oops"));
        assert!(result.valid);
        assert_eq!(form.error_message(), ("Login failed", &[][..]));
    }

    #[test]
    fn test_custom_heading() {
        let mut form = form();
        form.validate_object(&json!({"password": "secret"}), Some("Please fix"));
        let (heading, details) = form.error_message();
        assert_eq!(heading, "Please fix");
        assert_eq!(details, ["username: Expected required property"]);
    }

    #[test]
    fn test_options_defaults_applied() {
        let form = form();
        assert_eq!(form.options().button_label.as_deref(), Some("Submit"));
        assert_eq!(form.component_element(), "cruddy-form");
    }

    #[test]
    fn test_invalid_pattern_fails_construction() {
        let schema = Schema::new().field(
            FieldDef::string("code")
                .element("input")
                .input_type("text")
                .pattern("[a-"),
        );
        assert!(Form::new(schema, FormOptions::new()).is_err());
    }
}
