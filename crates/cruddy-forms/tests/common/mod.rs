#![allow(dead_code)]

use cruddy_forms::{FieldDef, Form, FormOptions, LocalizedString, Schema};

/// Login schema with plain labels.
pub fn login_schema() -> Schema {
    Schema::new()
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

/// Login schema with English, Spanish and French labels and hints.
pub fn localized_login_schema() -> Schema {
    Schema::new()
        .field(
            FieldDef::string("password")
                .element("input")
                .input_type("password")
                .min_length(4)
                .label(LocalizedString::from([
                    ("en", "Password"),
                    ("es", "Contraseña"),
                    ("fr", "Mot de passe"),
                ]))
                .hint(LocalizedString::from([
                    ("en", "Must be at least 4 characters long"),
                    ("es", "Debe tener al menos 4 caracteres"),
                    ("fr", "Doit contenir au moins 4 caractères"),
                ])),
        )
        .field(
            FieldDef::string("username")
                .element("input")
                .input_type("text")
                .max_length(6)
                .label(LocalizedString::from([
                    ("en", "Username"),
                    ("es", "Nombre de usuario"),
                    ("fr", "Nom d'utilisateur"),
                ]))
                .hint(LocalizedString::from([
                    ("en", "Maximum 6 characters"),
                    ("es", "Máximo 6 caracteres"),
                    ("fr", "Maximum 6 caractères"),
                ])),
        )
}

/// The plain login schema as a JSON object schema document.
pub const LOGIN_SCHEMA_JSON: &str = r#"{
    "type": "object",
    "properties": {
        "password": {"type": "string", "element": "input", "inputType": "password", "minLength": 4},
        "username": {"type": "string", "element": "input", "inputType": "text", "maxLength": 6}
    },
    "required": ["password", "username"]
}"#;

pub fn form(schema: Schema, options: FormOptions) -> Form {
    Form::new(schema, options).unwrap_or_else(|e| panic!("Failed to build form: {e}"))
}

pub fn render(form: &Form) -> String {
    form.render(None, None)
        .unwrap_or_else(|e| panic!("Failed to render: {e}"))
}

/// Returns the opening tag of the element whose class is `name`.
pub fn element_tag<'a>(html: &'a str, element: &str, name: &str) -> &'a str {
    let needle = format!(r#"<{element} class="{name}""#);
    let start = html
        .find(&needle)
        .unwrap_or_else(|| panic!("No {element} for {name} in:\n{html}"));
    let end = html[start..]
        .find('>')
        .unwrap_or_else(|| panic!("Unterminated tag for {name}"));
    &html[start..=start + end]
}

/// Returns the `<div>` block of one field.
pub fn field_block<'a>(html: &'a str, class: &str) -> &'a str {
    let needle = format!(r#"<div class="{class}">"#);
    let start = html
        .find(&needle)
        .unwrap_or_else(|| panic!("No block {class} in:\n{html}"));
    let end = html[start..]
        .find("</div>")
        .unwrap_or_else(|| panic!("Unterminated block {class}"));
    &html[start..start + end + "</div>".len()]
}
