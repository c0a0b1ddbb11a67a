//! HTML fragments for forms.
//!
//! Stateless functions over [`ElementData`] and [`FormOptions`]. Attribute
//! values taken from element data and submitted values are escaped; labels,
//! hints, legends and configured markup are emitted as given.

use std::collections::HashMap;

use crate::attrs::html_escape;
use crate::builder::ElementData;
use crate::options::FormOptions;

/// Opening and closing fieldset markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldsetHtml {
    /// Markup placed before the fields.
    pub start: String,
    /// Markup placed after the errors block.
    pub end: String,
}

/// Renders the element tag itself.
///
/// `values` holds the current field values keyed by field name; it decides
/// whether a checkbox is checked and fills a textarea's content.
pub fn element_html(data: &ElementData, values: &HashMap<String, String>) -> String {
    let mut html = format!(r#"<{} class="{}""#, data.element, html_escape(&data.name));

    for (key, value) in data.string_attributes.iter() {
        let key = key.to_lowercase();
        if key != "checked" {
            html.push_str(&format!(r#" {key}="{}""#, html_escape(value)));
        }
    }

    for attribute in &data.boolean_attributes {
        html.push(' ');
        html.push_str(attribute);
    }

    let current = data
        .string_attributes
        .get("name")
        .and_then(|name| values.get(name))
        .map(String::as_str);

    if data.is_checkbox() {
        if current == Some("true") {
            html.push_str(" checked");
        }
        html.push_str(" >");
    } else if data.element == "input" || data.element == "textarea" {
        html.push('>');
    } else {
        html.push_str("/>");
    }

    if data.element == "textarea" {
        html.push_str(&html_escape(current.unwrap_or_default()));
        html.push_str("</textarea>");
    }

    html
}

/// Renders a `<label>` for an element.
pub fn label_html(id: &str, label: &str) -> String {
    format!(r#"<label for="{id}">{label}</label>"#)
}

/// Renders the markup placed before the element.
///
/// Checkboxes get a hidden `off` input so an unchecked box still submits a
/// value. Other inputs get their label, except hidden inputs. Textareas get
/// nothing.
pub fn extra_html_before(data: &ElementData) -> String {
    if data.is_checkbox() {
        format!(
            r#" <input type="hidden" name="{}" value="off">"#,
            html_escape(&data.name)
        )
    } else if !matches!(data.input_type.as_str(), "checkbox" | "hidden") && data.element != "textarea"
    {
        label_html(&data.id, &data.label)
    } else {
        String::new()
    }
}

/// Renders the markup placed after the element.
///
/// Checkboxes get their label. Password inputs get the two visibility toggle
/// buttons when both icons are configured.
pub fn extra_html_after(data: &ElementData, options: &FormOptions) -> String {
    if data.is_checkbox() {
        return label_html(&data.id, &data.label);
    }

    if data.element == "input" && data.input_type == "password" {
        let hide = options.password_hide_svg.as_deref().unwrap_or_default();
        let show = options.password_show_svg.as_deref().unwrap_or_default();
        if !hide.is_empty() && !show.is_empty() {
            return format!(
                "<button class=\"button-password-hide\" type=\"button\">{hide}</button>\n\
                 <button class=\"button-password-show\" type=\"button\">{show}</button>"
            );
        }
    }

    String::new()
}

/// Renders the hint block, or nothing for an empty hint.
pub fn hint_html(hint: Option<&str>) -> String {
    match hint {
        Some(hint) if !hint.is_empty() => format!(r#"<div class="requirements">{hint}</div>"#),
        _ => String::new(),
    }
}

/// Renders the errors block, or nothing when there is no message.
pub fn errors_html(message: &str, details: &[String]) -> String {
    if message.is_empty() {
        return String::new();
    }

    if details.is_empty() {
        format!("<div class=\"error\">\n{message}\n\n</div>")
    } else {
        format!(
            "<div class=\"error\">\n<span>{message}:</span>\n<ul>\n<li>\n{}</li>\n</ul>\n</div>",
            details.join("</li>\n<li>\n")
        )
    }
}

/// Renders the submit button wrapped in a div of class `cls` (default `submit`).
pub fn submit_button_html(label: &str, cls: Option<&str>) -> String {
    let div_class = cls.unwrap_or("submit");
    format!(
        r#"<div class="{div_class}"><input class="button" type="submit" value="{label}"></div>"#
    )
}

/// Renders the opening `<form>` tag.
pub fn form_element_html(options: &FormOptions) -> String {
    let action = options
        .action
        .as_ref()
        .map(|a| format!(r#" action="{a}""#))
        .unwrap_or_default();
    let class = options.class.as_ref().map_or_else(
        || r#" class="normform""#.to_string(),
        |c| format!(r#" class="normform {c}""#),
    );
    let id = options
        .id
        .as_ref()
        .map(|id| format!(r#" id="{id}""#))
        .unwrap_or_default();
    let novalidate = if options.novalidate { " novalidate" } else { "" };
    let method = options
        .method
        .map(|m| format!(r#" method="{m}""#))
        .unwrap_or_default();

    format!("<form{action}{class}{id}{novalidate}{method}>")
}

/// Renders the fieldset wrapper, empty when disabled.
pub fn fieldset_html(fieldset: bool, legend: Option<&str>) -> FieldsetHtml {
    if !fieldset {
        return FieldsetHtml::default();
    }

    let start = match legend {
        Some(legend) if !legend.is_empty() => {
            format!("<fieldset><legend>{legend}</legend>")
        }
        _ => "<fieldset>".to_string(),
    };

    FieldsetHtml {
        start,
        end: "</fieldset>".to_string(),
    }
}

/// Renders the complete block of one field.
pub fn field_html(
    data: &ElementData,
    values: &HashMap<String, String>,
    options: &FormOptions,
) -> String {
    let div_class = if data.input_type.is_empty() {
        &data.element
    } else {
        &data.input_type
    };

    format!(
        r#"<div class="{div_class}">{}{}{}{}</div>"#,
        extra_html_before(data),
        element_html(data, values),
        extra_html_after(data, options),
        hint_html(data.hint.as_deref()),
    )
}
