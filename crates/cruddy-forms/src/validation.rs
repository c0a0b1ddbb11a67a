//! Validation of submitted data against a schema.
//!
//! A [`Validator`] compiles each field's validation keywords (`minLength`,
//! `maxLength`, `pattern`, `format`, `minimum`, `maximum`) into
//! [`Constraint`]s once, then checks whole objects. Every violation is
//! collected; a result is valid only when there are none.

use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{FormError, Result};
use crate::form_data::{collapse_checkbox_pairs, parse_form_fields, FormData};
use crate::schema::{AttrValue, FieldDef, FieldType, Schema};

/// The kind of a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueErrorKind {
    /// The data is not an object.
    Object,
    /// A required field is missing.
    RequiredProperty,
    /// A value is not a string.
    String,
    /// A value is not a boolean.
    Boolean,
    /// A value is not a number.
    Number,
    /// A value is not an integer.
    Integer,
    /// A string is too short.
    StringMinLength,
    /// A string is too long.
    StringMaxLength,
    /// A string does not match its pattern.
    StringPattern,
    /// A string does not match its format.
    StringFormat,
    /// A number is below its minimum.
    NumberMinimum,
    /// A number is above its maximum.
    NumberMaximum,
}

/// A single validation error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueError {
    /// The kind of error.
    pub kind: ValueErrorKind,
    /// Path of the offending value, `/field` or empty for the whole object.
    pub path: String,
    /// Human-readable message.
    pub message: String,
    /// The offending value, `null` when missing.
    pub value: Value,
}

impl std::fmt::Display for ValueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let path = self.path.strip_prefix('/').unwrap_or(&self.path);
        write!(f, "{path}: {}", self.message)
    }
}

/// The outcome of a validation call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// The validated data.
    pub data: Value,
    /// Formatted errors, `field: message`.
    pub errors: Vec<String>,
    /// Structured errors.
    pub errors_raw: Vec<ValueError>,
    /// Whether the data conforms to the schema.
    pub valid: bool,
}

/// Trait for field constraints.
pub trait Constraint: Send + Sync + std::fmt::Debug {
    /// Checks a present value and returns the error message if it violates
    /// the constraint. Values of a type the constraint does not apply to pass.
    fn validate(&self, value: &Value) -> std::result::Result<(), String>;

    /// Returns the kind of error this constraint reports.
    fn kind(&self) -> ValueErrorKind;
}

/// Constraint on the value type of a field.
#[derive(Debug, Clone, Copy)]
pub struct TypeConstraint {
    field_type: FieldType,
}

impl TypeConstraint {
    /// Creates a new TypeConstraint.
    pub fn new(field_type: FieldType) -> Self {
        Self { field_type }
    }
}

impl Constraint for TypeConstraint {
    fn validate(&self, value: &Value) -> std::result::Result<(), String> {
        let ok = match self.field_type {
            FieldType::String => value.is_string(),
            FieldType::Boolean => value.is_boolean(),
            FieldType::Number => value.is_number(),
            FieldType::Integer => value.as_f64().is_some_and(|n| n.fract() == 0.0),
        };
        if ok {
            Ok(())
        } else {
            Err(format!("Expected {}", self.field_type))
        }
    }

    fn kind(&self) -> ValueErrorKind {
        match self.field_type {
            FieldType::String => ValueErrorKind::String,
            FieldType::Boolean => ValueErrorKind::Boolean,
            FieldType::Number => ValueErrorKind::Number,
            FieldType::Integer => ValueErrorKind::Integer,
        }
    }
}

/// Constraint enforcing a minimum string length, in characters.
#[derive(Debug, Clone)]
pub struct MinLengthConstraint {
    min_length: usize,
}

impl MinLengthConstraint {
    /// Creates a new MinLengthConstraint.
    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }
}

impl Constraint for MinLengthConstraint {
    fn validate(&self, value: &Value) -> std::result::Result<(), String> {
        match value.as_str() {
            Some(s) if s.chars().count() < self.min_length => Err(format!(
                "Expected string length greater or equal to {}",
                self.min_length
            )),
            _ => Ok(()),
        }
    }

    fn kind(&self) -> ValueErrorKind {
        ValueErrorKind::StringMinLength
    }
}

/// Constraint enforcing a maximum string length, in characters.
#[derive(Debug, Clone)]
pub struct MaxLengthConstraint {
    max_length: usize,
}

impl MaxLengthConstraint {
    /// Creates a new MaxLengthConstraint.
    pub fn new(max_length: usize) -> Self {
        Self { max_length }
    }
}

impl Constraint for MaxLengthConstraint {
    fn validate(&self, value: &Value) -> std::result::Result<(), String> {
        match value.as_str() {
            Some(s) if s.chars().count() > self.max_length => Err(format!(
                "Expected string length less or equal to {}",
                self.max_length
            )),
            _ => Ok(()),
        }
    }

    fn kind(&self) -> ValueErrorKind {
        ValueErrorKind::StringMaxLength
    }
}

/// Constraint using a regex pattern. The pattern may match anywhere in the
/// string.
#[derive(Debug, Clone)]
pub struct PatternConstraint {
    pattern: Regex,
}

impl PatternConstraint {
    /// Creates a new PatternConstraint.
    pub fn new(pattern: &str) -> std::result::Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }
}

impl Constraint for PatternConstraint {
    fn validate(&self, value: &Value) -> std::result::Result<(), String> {
        match value.as_str() {
            Some(s) if !self.pattern.is_match(s) => Err(format!(
                "Expected string to match '{}'",
                self.pattern.as_str()
            )),
            _ => Ok(()),
        }
    }

    fn kind(&self) -> ValueErrorKind {
        ValueErrorKind::StringPattern
    }
}

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";
const URI_PATTERN: &str = r"^[a-zA-Z][a-zA-Z0-9+.-]*://[^\s/?#]+[^\s]*$";

/// Constraint for a named string format (`email`, `uri`).
#[derive(Debug, Clone)]
pub struct FormatConstraint {
    format: String,
    pattern: Regex,
}

impl FormatConstraint {
    /// Creates a new FormatConstraint, or `None` for an unknown format.
    pub fn new(format: &str) -> Option<Self> {
        let pattern = match format {
            "email" => EMAIL_PATTERN,
            "uri" | "url" => URI_PATTERN,
            _ => return None,
        };
        Regex::new(pattern).ok().map(|pattern| Self {
            format: format.to_string(),
            pattern,
        })
    }
}

impl Constraint for FormatConstraint {
    fn validate(&self, value: &Value) -> std::result::Result<(), String> {
        match value.as_str() {
            Some(s) if !self.pattern.is_match(s) => Err(format!(
                "Expected string to match '{}' format",
                self.format
            )),
            _ => Ok(()),
        }
    }

    fn kind(&self) -> ValueErrorKind {
        ValueErrorKind::StringFormat
    }
}

/// Constraint for an inclusive numeric minimum.
#[derive(Debug, Clone)]
pub struct MinimumConstraint {
    minimum: f64,
}

impl MinimumConstraint {
    /// Creates a new MinimumConstraint.
    pub fn new(minimum: f64) -> Self {
        Self { minimum }
    }
}

impl Constraint for MinimumConstraint {
    fn validate(&self, value: &Value) -> std::result::Result<(), String> {
        match value.as_f64() {
            Some(n) if n < self.minimum => Err(format!(
                "Expected number to be greater or equal to {}",
                self.minimum
            )),
            _ => Ok(()),
        }
    }

    fn kind(&self) -> ValueErrorKind {
        ValueErrorKind::NumberMinimum
    }
}

/// Constraint for an inclusive numeric maximum.
#[derive(Debug, Clone)]
pub struct MaximumConstraint {
    maximum: f64,
}

impl MaximumConstraint {
    /// Creates a new MaximumConstraint.
    pub fn new(maximum: f64) -> Self {
        Self { maximum }
    }
}

impl Constraint for MaximumConstraint {
    fn validate(&self, value: &Value) -> std::result::Result<(), String> {
        match value.as_f64() {
            Some(n) if n > self.maximum => Err(format!(
                "Expected number to be less or equal to {}",
                self.maximum
            )),
            _ => Ok(()),
        }
    }

    fn kind(&self) -> ValueErrorKind {
        ValueErrorKind::NumberMaximum
    }
}

#[derive(Debug)]
struct FieldRules {
    name: String,
    required: bool,
    type_constraint: TypeConstraint,
    constraints: Vec<Box<dyn Constraint>>,
}

impl FieldRules {
    fn compile(field: &FieldDef, required: bool) -> Result<Self> {
        let mut constraints: Vec<Box<dyn Constraint>> = Vec::new();

        for (key, value) in field.attrs() {
            match key {
                "minLength" => {
                    let min = length(field, key, value)?;
                    constraints.push(Box::new(MinLengthConstraint::new(min)));
                }
                "maxLength" => {
                    let max = length(field, key, value)?;
                    constraints.push(Box::new(MaxLengthConstraint::new(max)));
                }
                "pattern" => {
                    let pattern = value.to_text().ok_or_else(|| {
                        invalid(field, key, "a pattern must be plain text")
                    })?;
                    let constraint =
                        PatternConstraint::new(&pattern).map_err(|source| {
                            FormError::InvalidPattern {
                                field: field.name.clone(),
                                source,
                            }
                        })?;
                    constraints.push(Box::new(constraint));
                }
                "format" => {
                    let format = value.to_text().unwrap_or_default();
                    let constraint = FormatConstraint::new(&format)
                        .ok_or_else(|| invalid(field, key, "unknown format"))?;
                    constraints.push(Box::new(constraint));
                }
                "minimum" => {
                    let min = value
                        .as_f64()
                        .ok_or_else(|| invalid(field, key, "expected a number"))?;
                    constraints.push(Box::new(MinimumConstraint::new(min)));
                }
                "maximum" => {
                    let max = value
                        .as_f64()
                        .ok_or_else(|| invalid(field, key, "expected a number"))?;
                    constraints.push(Box::new(MaximumConstraint::new(max)));
                }
                _ => {}
            }
        }

        Ok(Self {
            name: field.name.clone(),
            required,
            type_constraint: TypeConstraint::new(field.field_type),
            constraints,
        })
    }

    fn check(&self, value: &Value, errors: &mut Vec<ValueError>) {
        let path = format!("/{}", self.name);
        let error = |kind, message| ValueError {
            kind,
            path: path.clone(),
            message,
            value: value.clone(),
        };

        if let Err(message) = self.type_constraint.validate(value) {
            errors.push(error(self.type_constraint.kind(), message));
            return;
        }

        for constraint in &self.constraints {
            if let Err(message) = constraint.validate(value) {
                errors.push(error(constraint.kind(), message));
            }
        }
    }
}

fn length(field: &FieldDef, key: &str, value: &AttrValue) -> Result<usize> {
    value
        .as_usize()
        .ok_or_else(|| invalid(field, key, "expected a non-negative integer"))
}

fn invalid(field: &FieldDef, key: &str, reason: &str) -> FormError {
    FormError::InvalidAttribute {
        field: field.name.clone(),
        attribute: key.to_string(),
        reason: reason.to_string(),
    }
}

/// Validates data against a schema.
#[derive(Debug)]
pub struct Validator {
    schema: Schema,
    fields: Vec<FieldRules>,
}

impl Validator {
    /// Compiles the validation rules of a schema.
    pub fn new(schema: &Schema) -> Result<Self> {
        let fields = schema
            .fields()
            .iter()
            .map(|field| FieldRules::compile(field, schema.is_required(&field.name)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            schema: schema.clone(),
            fields,
        })
    }

    /// Returns the schema this validator checks against.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Validates submitted form data.
    ///
    /// Values are coerced to the field types first, and a checkbox that
    /// submitted both its hidden `off` value and its own value counts as
    /// checked.
    pub fn validate_form_data(&self, form_data: &FormData) -> ValidationResult {
        let parsed = collapse_checkbox_pairs(parse_form_fields(form_data, &self.schema));
        self.validate_object(&Value::Object(parsed))
    }

    /// Validates a JSON object.
    pub fn validate_object(&self, data: &Value) -> ValidationResult {
        let mut errors_raw = Vec::new();

        match data.as_object() {
            None => errors_raw.push(ValueError {
                kind: ValueErrorKind::Object,
                path: String::new(),
                message: "Expected object".to_string(),
                value: data.clone(),
            }),
            Some(object) => {
                for field in &self.fields {
                    match object.get(&field.name) {
                        Some(value) => field.check(value, &mut errors_raw),
                        None if field.required => errors_raw.push(ValueError {
                            kind: ValueErrorKind::RequiredProperty,
                            path: format!("/{}", field.name),
                            message: "Expected required property".to_string(),
                            value: Value::Null,
                        }),
                        None => {}
                    }
                }
            }
        }

        let errors: Vec<String> = errors_raw.iter().map(ToString::to_string).collect();
        let valid = errors_raw.is_empty();
        debug!(valid, errors = errors.len(), "Validated data against schema");

        ValidationResult {
            data: data.clone(),
            errors,
            errors_raw,
            valid,
        }
    }

    /// Serializes a value to JSON and validates it.
    pub fn validate_serialize<T: Serialize>(&self, data: &T) -> Result<ValidationResult> {
        Ok(self.validate_object(&serde_json::to_value(data)?))
    }
}
