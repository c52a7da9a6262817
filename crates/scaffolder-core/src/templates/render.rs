//! `{{ key }}` rendering of template files through tera

use crate::error::ScaffoldError;
use crate::naming::title_case;
use std::error::Error as _;
use tera::{Context as TeraContext, Tera};

/// Values available to rendered files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateData {
    /// Human readable app name, e.g. for the page title
    pub app_title: String,
}

impl TemplateData {
    pub fn from_app_name(app_name: &str) -> Self {
        Self {
            app_title: title_case(app_name),
        }
    }

    fn to_context(&self) -> TeraContext {
        let mut context = TeraContext::new();
        context.insert("appTitle", &self.app_title);
        context
    }
}

/// Render `content` with the template data.
///
/// Values are HTML-escaped.
pub fn render(content: &str, data: &TemplateData, file: &str) -> Result<String, ScaffoldError> {
    Tera::one_off(content, &data.to_context(), true).map_err(|e| parse_tera_error(&e, file))
}

fn parse_tera_error(error: &tera::Error, file: &str) -> ScaffoldError {
    // tera wraps the cause in "Failed to render '__tera_one_off'"
    let mut messages = vec![error.to_string()];
    let mut source = error.source();
    while let Some(cause) = source {
        messages.push(cause.to_string());
        source = cause.source();
    }

    if let Some(name) = messages.iter().find_map(|m| extract_variable_name(m)) {
        return ScaffoldError::UnknownVariable {
            file: file.to_string(),
            name,
        };
    }

    ScaffoldError::TemplateSyntax {
        file: file.to_string(),
        reason: messages.join(": "),
    }
}

/// Extract the name from "Variable `foo` not found in context ..."
fn extract_variable_name(message: &str) -> Option<String> {
    let rest = message.strip_prefix("Variable `")?;
    let (name, tail) = rest.split_once('`')?;
    tail.trim_start()
        .starts_with("not found")
        .then(|| name.to_string())
}
