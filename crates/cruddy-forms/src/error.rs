//! Error types for forms.

use thiserror::Error;

use crate::i18n::Localization;

/// Schema configuration errors.
///
/// These are raised while a schema is introspected or compiled and are never
/// retried. A failed validation is not an error; see
/// [`ValidationResult`](crate::ValidationResult).
#[derive(Debug, Error)]
pub enum FormError {
    /// A field does not declare its `element`.
    #[error("Invalid schema - element is required (field '{field}')")]
    MissingElement { field: String },

    /// A field does not declare its `inputType`.
    #[error("Invalid schema - inputType is required (field '{field}')")]
    MissingInputType { field: String },

    /// Localized and plain values were mixed within one schema.
    #[error(
        "Mixed localized and non-localized values are not allowed: field '{field}' is {found}, \
         fields already confirmed as {}: [{}]",
        .found.opposite(),
        .confirmed.join(", ")
    )]
    MixedLocalization {
        /// The field whose value broke the classification.
        field: String,
        /// How the offending field's value was classified.
        found: Localization,
        /// Fields already confirmed with the schema's classification.
        confirmed: Vec<String>,
    },

    /// The schema is localized but no language was requested.
    #[error("Language must be specified for internationalized schema")]
    MissingLanguage,

    /// The requested language is not a key of a localized value.
    #[error(
        "Language '{lang}' is not available in the schema (field '{field}', available: {})",
        .available.join(", ")
    )]
    UnknownLanguage {
        lang: String,
        field: String,
        /// Languages the field does provide.
        available: Vec<String>,
    },

    /// An attribute value that cannot be expressed as markup or as a constraint.
    #[error("invalid attribute '{attribute}' on field '{field}': {reason}")]
    InvalidAttribute {
        field: String,
        attribute: String,
        reason: String,
    },

    /// A `pattern` attribute that is not a valid regular expression.
    #[error("invalid pattern on field '{field}': {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },

    /// A schema document that is not an object schema.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    /// JSON (de)serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for form operations.
pub type Result<T> = std::result::Result<T, FormError>;
