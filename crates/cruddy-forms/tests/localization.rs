//! Integration tests for localized schemas.

mod common;

use common::{field_block, form, localized_login_schema};
use cruddy_forms::{FieldDef, FormError, FormOptions, LocalizedString, Schema};

fn label_and_hint(html: &str, class: &str) -> (String, String) {
    let block = field_block(html, class);
    let label = block
        .split_once("\">")
        .and_then(|(_, rest)| rest.split_once("\">"))
        .and_then(|(_, rest)| rest.split_once("</label>"))
        .map(|(label, _)| label.to_string())
        .unwrap_or_default();
    let hint = block
        .split_once(r#"<div class="requirements">"#)
        .and_then(|(_, rest)| rest.split_once("</div>"))
        .map(|(hint, _)| hint.to_string())
        .unwrap_or_default();
    (label, hint)
}

#[test]
fn test_english_labels_and_hints() {
    let form = form(localized_login_schema(), FormOptions::new());
    let html = form.render(None, Some("en")).unwrap();

    assert_eq!(
        label_and_hint(&html, "password"),
        ("Password".to_string(), "Must be at least 4 characters long".to_string())
    );
    assert_eq!(
        label_and_hint(&html, "text"),
        ("Username".to_string(), "Maximum 6 characters".to_string())
    );
}

#[test]
fn test_spanish_labels_and_hints() {
    let form = form(localized_login_schema(), FormOptions::new());
    let html = form.render(None, Some("es")).unwrap();

    assert_eq!(
        label_and_hint(&html, "password"),
        ("Contraseña".to_string(), "Debe tener al menos 4 caracteres".to_string())
    );
    assert_eq!(
        label_and_hint(&html, "text"),
        ("Nombre de usuario".to_string(), "Máximo 6 caracteres".to_string())
    );
}

#[test]
fn test_french_labels_and_hints() {
    let form = form(localized_login_schema(), FormOptions::new());
    let html = form.render(None, Some("fr")).unwrap();

    assert_eq!(
        label_and_hint(&html, "password"),
        ("Mot de passe".to_string(), "Doit contenir au moins 4 caractères".to_string())
    );
    assert_eq!(
        label_and_hint(&html, "text"),
        ("Nom d'utilisateur".to_string(), "Maximum 6 caractères".to_string())
    );
}

#[test]
fn test_localized_schema_requires_language() {
    let form = form(localized_login_schema(), FormOptions::new());
    let err = form.render(None, None).unwrap_err();
    assert!(matches!(err, FormError::MissingLanguage));
    assert_eq!(
        err.to_string(),
        "Language must be specified for internationalized schema"
    );
}

#[test]
fn test_unknown_language() {
    let form = form(localized_login_schema(), FormOptions::new());
    let err = form.render(None, Some("de")).unwrap_err();
    assert!(matches!(err, FormError::UnknownLanguage { ref lang, .. } if lang == "de"));
}

#[test]
fn test_language_is_ignored_for_plain_schema() {
    let form = form(common::login_schema(), FormOptions::new());
    assert!(form.render(None, Some("de")).is_ok());
}

#[test]
fn test_mixed_localization_is_rejected_in_any_order() {
    let localized = || {
        FieldDef::string("username")
            .element("input")
            .input_type("text")
            .label(LocalizedString::from([("en", "Username")]))
    };
    let plain = || {
        FieldDef::string("email")
            .element("input")
            .input_type("email")
            .label("Email")
    };

    for schema in [
        Schema::new().field(localized()).field(plain()),
        Schema::new().field(plain()).field(localized()),
    ] {
        let form = form(schema, FormOptions::new());
        for lang in [None, Some("en")] {
            let err = form.render(None, lang).unwrap_err();
            assert!(matches!(err, FormError::MixedLocalization { .. }));
            assert!(err
                .to_string()
                .starts_with("Mixed localized and non-localized values are not allowed"));
        }
    }
}

#[test]
fn test_localized_placeholder_and_endpoint() {
    let schema = Schema::new().field(
        FieldDef::string("username")
            .element("input")
            .input_type("text")
            .placeholder(LocalizedString::from([("en", "jane"), ("es", "juana")]))
            .endpoint(LocalizedString::from([("en", "/en/check"), ("es", "/es/check")])),
    );
    let form = form(schema, FormOptions::new());
    let html = form.render(None, Some("es")).unwrap();

    assert!(html.contains(r#"placeholder="juana""#));
    assert!(html.contains(r#"data-endpoint="/es/check""#));
    assert!(!html.contains(r#"placeholder="""#));
}
