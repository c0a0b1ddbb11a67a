//! # cruddy-forms
//!
//! Server-rendered HTML forms and validation from one schema.
//!
//! This crate provides:
//! - Object schemas with per-field markup and validation attributes
//! - Localized labels, hints, placeholders and endpoints
//! - HTML form rendering with default attributes for text inputs
//! - Validation of submitted form data and JSON objects
//!
//! ## Quick Start
//!
//! ```rust
//! use cruddy_forms::{FieldDef, Form, FormData, FormOptions, Schema};
//!
//! let schema = Schema::new()
//!     .field(
//!         FieldDef::string("username")
//!             .element("input")
//!             .input_type("text")
//!             .max_length(6),
//!     )
//!     .field(
//!         FieldDef::string("password")
//!             .element("input")
//!             .input_type("password")
//!             .min_length(4),
//!     );
//!
//! let mut form = Form::new(schema, FormOptions::new().action("/login")).unwrap();
//! let html = form.render(None, None).unwrap();
//! assert!(html.contains(r#"<div class="password">"#));
//!
//! let submitted = FormData::from_urlencoded("username=jane&password=123");
//! let result = form.validate(&submitted, None);
//! assert!(!result.valid);
//! assert_eq!(
//!     result.errors,
//!     vec!["password: Expected string length greater or equal to 4"]
//! );
//!
//! // The next render shows the errors.
//! let html = form.render(None, None).unwrap();
//! assert!(html.contains("<span>Validation Errors:</span>"));
//! ```
//!
//! ## Localization
//!
//! Either every `label`, `hint`, `placeholder` and `endpoint` of a schema is
//! localized, or none is. A localized schema needs a language to render.
//!
//! ```rust
//! use cruddy_forms::{FieldDef, Form, FormError, FormOptions, LocalizedString, Schema};
//!
//! let schema = Schema::new().field(
//!     FieldDef::string("username")
//!         .element("input")
//!         .input_type("text")
//!         .label(LocalizedString::from([("en", "Username"), ("es", "Usuario")])),
//! );
//! let form = Form::new(schema, FormOptions::new()).unwrap();
//!
//! let html = form.render(None, Some("es")).unwrap();
//! assert!(html.contains(">Usuario</label>"));
//!
//! assert!(matches!(form.render(None, None), Err(FormError::MissingLanguage)));
//! assert!(matches!(
//!     form.render(None, Some("fr")),
//!     Err(FormError::UnknownLanguage { .. })
//! ));
//! ```
//!
//! ## JSON Schemas
//!
//! ```rust
//! use cruddy_forms::{FieldType, Schema};
//!
//! let schema = Schema::from_json(
//!     r#"{
//!         "type": "object",
//!         "properties": {
//!             "email": {"type": "string", "element": "input", "inputType": "email", "format": "email"}
//!         },
//!         "required": ["email"]
//!     }"#,
//! )
//! .unwrap();
//! assert_eq!(schema.get("email").unwrap().field_type, FieldType::String);
//! ```

pub mod attrs;
pub mod builder;
mod error;
mod form;
pub mod form_data;
pub mod i18n;
pub mod markup;
pub mod options;
pub mod schema;
pub mod validation;

pub use builder::{ElementData, HtmlBuilder};
pub use error::{FormError, Result};
pub use form::Form;
pub use form_data::FormData;
pub use i18n::Localization;
pub use options::{FormOptions, Method};
pub use schema::{AttrValue, FieldDef, FieldType, LocalizedString, Schema};
pub use validation::{ValidationResult, Validator, ValueError, ValueErrorKind};
