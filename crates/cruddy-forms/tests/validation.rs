//! Integration tests for validation and its feedback into rendering.

mod common;

use common::{form, login_schema, render, LOGIN_SCHEMA_JSON};
use cruddy_forms::{
    FieldDef, FormData, FormOptions, Schema, ValidationResult, Validator, ValueErrorKind,
};
use pretty_assertions::assert_eq;
use serde::Serialize;
use serde_json::json;

fn validator() -> Validator {
    Validator::new(&login_schema()).unwrap()
}

#[test]
fn test_object_validation() {
    let v = validator();

    assert!(v.validate_object(&json!({"password": "mypassword", "username": "myuser"})).valid);
    assert!(!v.validate_object(&json!({"password": "mypassword"})).valid);
    assert!(!v.validate_object(&json!({"password": "123", "username": "myuser"})).valid);
    assert!(!v.validate_object(&json!({"password": "mypassword", "username": "1234567"})).valid);
}

#[test]
fn test_form_data_validation() {
    let v = validator();

    let valid = FormData::from_urlencoded("password=mypassword&username=myuser");
    assert!(v.validate_form_data(&valid).valid);

    let missing = FormData::from_urlencoded("password=mypassword");
    let result = v.validate_form_data(&missing);
    assert!(!result.valid);
    assert_eq!(result.errors, vec!["username: Expected required property"]);

    let short = FormData::from_urlencoded("password=123&username=myuser");
    assert!(!v.validate_form_data(&short).valid);

    let long = FormData::from_urlencoded("password=mypassword&username=1234567");
    assert!(!v.validate_form_data(&long).valid);
}

#[test]
fn test_json_schema_validates_like_built_schema() {
    let schema = Schema::from_json(LOGIN_SCHEMA_JSON).unwrap();
    assert_eq!(schema, login_schema());

    let v = Validator::new(&schema).unwrap();
    let result = v.validate_object(&json!({"password": "123", "username": "1234567"}));
    assert_eq!(
        result.errors,
        vec![
            "password: Expected string length greater or equal to 4",
            "username: Expected string length less or equal to 6",
        ]
    );
}

#[test]
fn test_typed_fields_from_form_data() {
    let schema = Schema::new()
        .field(
            FieldDef::integer("age")
                .element("input")
                .input_type("number")
                .attr("minimum", 18)
                .attr("maximum", 130),
        )
        .field(
            FieldDef::string("email")
                .element("input")
                .input_type("email")
                .attr("format", "email"),
        )
        .optional(
            FieldDef::boolean("newsletter")
                .element("input")
                .input_type("checkbox"),
        );
    let v = Validator::new(&schema).unwrap();

    let ok = FormData::new()
        .with("age", "42")
        .with("email", "jane@example.com")
        .with("newsletter", "off")
        .with("newsletter", "on");
    let result = v.validate_form_data(&ok);
    assert!(result.valid, "{:?}", result.errors);
    assert_eq!(
        result.data,
        json!({"age": 42, "email": "jane@example.com", "newsletter": true})
    );

    let bad = FormData::new()
        .with("age", "12")
        .with("email", "jane")
        .with("newsletter", "maybe");
    let result = v.validate_form_data(&bad);
    let kinds: Vec<ValueErrorKind> = result.errors_raw.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ValueErrorKind::NumberMinimum,
            ValueErrorKind::StringFormat,
            ValueErrorKind::Boolean,
        ]
    );
    assert_eq!(
        result.errors,
        vec![
            "age: Expected number to be greater or equal to 18",
            "email: Expected string to match 'email' format",
            "newsletter: Expected boolean",
        ]
    );

    let not_a_number = FormData::new().with("age", "old").with("email", "jane@example.com");
    let result = v.validate_form_data(&not_a_number);
    assert_eq!(result.errors, vec!["age: Expected integer"]);
}

#[test]
fn test_validate_serialize() {
    #[derive(Serialize)]
    struct Login<'a> {
        password: &'a str,
        username: &'a str,
    }

    let v = validator();
    let result = v
        .validate_serialize(&Login {
            password: "mypassword",
            username: "myuser",
        })
        .unwrap();
    assert!(result.valid);
    assert_eq!(result.data, json!({"password": "mypassword", "username": "myuser"}));
}

// =============================================================================
// Form feedback
// =============================================================================

#[test]
fn test_failed_validation_renders_errors() {
    let mut form = form(login_schema(), FormOptions::new());
    let data = FormData::from_urlencoded("password=123&username=1234567");
    let result = form.validate(&data, None);
    assert!(!result.valid);

    let html = render(&form);
    assert!(html.contains(
        "</div>\n<div class=\"error\">\n<span>Validation Errors:</span>\n<ul>\n<li>\npassword: Expected string length greater or equal to 4</li>\n<li>\nusername: Expected string length less or equal to 6</li>\n</ul>\n</div><div class=\"submit\">"
    ));
}

#[test]
fn test_error_message_without_details() {
    let mut form = form(login_schema(), FormOptions::new());
    form.set_error_message("Invalid credentials", Vec::new());
    let html = render(&form);
    assert!(html.contains("\n<div class=\"error\">\nInvalid credentials\n\n</div><div class=\"submit\">"));
}

#[test]
fn test_error_heading_from_result() {
    let mut form = form(login_schema(), FormOptions::new());
    let result: ValidationResult = form.validate_object(&json!({}), Some("Please correct"));
    assert_eq!(result.errors.len(), 2);
    assert!(render(&form).contains("<span>Please correct:</span>"));
}

#[test]
fn test_rendered_constraints_accept_conforming_data() {
    let mut form = form(login_schema(), FormOptions::new());
    let html = render(&form);
    assert!(html.contains(r#"minlength="4""#));
    assert!(html.contains(r#"maxlength="6""#));

    let data = FormData::new().with("password", "abcd").with("username", "abcdef");
    assert!(form.validate(&data, None).valid);
    assert!(!render(&form).contains(r#"class="error""#));
}
