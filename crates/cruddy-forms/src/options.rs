//! Form configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default markup of the button that hides a revealed password.
pub const PASSWORD_HIDE_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24" stroke-width="1.5" stroke="currentColor" width="24" height="24">
<path stroke-linecap="round" stroke-linejoin="round" d="M3.98 8.223A10.477 10.477 0 001.934 12C3.226 16.338 7.244 19.5 12 19.5c.993 0 1.953-.138 2.863-.395M6.228 6.228A10.45 10.45 0 0112 4.5c4.756 0 8.773 3.162 10.065 7.498a10.523 10.523 0 01-4.293 5.774M6.228 6.228L3 3m3.228 3.228l3.65 3.65m7.894 7.894L21 21m-3.228-3.228l-3.65-3.65m0 0a3 3 0 10-4.243-4.243m4.242 4.242L9.88 9.88" />
</svg>"#;

/// Default markup of the button that reveals a password.
pub const PASSWORD_SHOW_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24" stroke-width="1.5" stroke="currentColor" width="24" height="24">
<path stroke-linecap="round" stroke-linejoin="round" d="M2.036 12.322a1.012 1.012 0 010-.639C3.423 7.51 7.36 4.5 12 4.5c4.638 0 8.573 3.007 9.963 7.178.07.207.07.431 0 .639C20.577 16.49 16.64 19.5 12 19.5c-4.638 0-8.573-3.007-9.963-7.178z" />
<path stroke-linecap="round" stroke-linejoin="round" d="M15 12a3 3 0 11-6 0 3 3 0 016 0z" />
</svg>"#;

/// Form submission method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// GET method
    Get,
    /// POST method
    #[default]
    Post,
}

impl Method {
    /// Returns the method as written in the `method` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Options read once when a [`Form`](crate::Form) is constructed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormOptions {
    /// Form `action` URL.
    pub action: Option<String>,
    /// Label of the submit button.
    pub button_label: Option<String>,
    /// Extra class appended after `normform`.
    pub class: Option<String>,
    /// Markup inserted before the fields.
    #[serde(rename = "extraHTML")]
    pub extra_html: Option<String>,
    /// Wraps the fields in a `<fieldset>`.
    pub fieldset: bool,
    /// Form `id`.
    pub id: Option<String>,
    /// Suffix of every generated element id.
    pub id_suffix: Option<String>,
    /// Fieldset legend.
    pub legend: Option<String>,
    /// Form `method`.
    pub method: Option<Method>,
    /// Adds the `novalidate` attribute.
    pub novalidate: bool,
    /// Markup of the hide-password button.
    #[serde(rename = "passwordHideSVG")]
    pub password_hide_svg: Option<String>,
    /// Markup of the show-password button.
    #[serde(rename = "passwordShowSVG")]
    pub password_show_svg: Option<String>,
}

impl FormOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads options from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the form action.
    #[must_use]
    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Sets the submit button label.
    #[must_use]
    pub fn button_label(mut self, label: impl Into<String>) -> Self {
        self.button_label = Some(label.into());
        self
    }

    /// Sets the extra form class.
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Sets markup inserted before the fields.
    #[must_use]
    pub fn extra_html(mut self, html: impl Into<String>) -> Self {
        self.extra_html = Some(html.into());
        self
    }

    /// Wraps the fields in a fieldset with an optional legend.
    #[must_use]
    pub fn fieldset(mut self, legend: Option<&str>) -> Self {
        self.fieldset = true;
        self.legend = legend.map(str::to_string);
        self
    }

    /// Sets the form id.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the element id suffix.
    #[must_use]
    pub fn id_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.id_suffix = Some(suffix.into());
        self
    }

    /// Sets the form method.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Disables browser validation.
    #[must_use]
    pub fn novalidate(mut self) -> Self {
        self.novalidate = true;
        self
    }

    /// Sets the password toggle button markup.
    #[must_use]
    pub fn password_svgs(mut self, hide: impl Into<String>, show: impl Into<String>) -> Self {
        self.password_hide_svg = Some(hide.into());
        self.password_show_svg = Some(show.into());
        self
    }

    /// Fills the defaults applied by a form: `post`, the `Submit` label and
    /// the password toggle icons.
    #[must_use]
    pub(crate) fn with_form_defaults(mut self) -> Self {
        self.method.get_or_insert(Method::Post);
        self.button_label.get_or_insert_with(|| "Submit".to_string());
        self.password_hide_svg
            .get_or_insert_with(|| PASSWORD_HIDE_SVG.to_string());
        self.password_show_svg
            .get_or_insert_with(|| PASSWORD_SHOW_SVG.to_string());
        self
    }
}
