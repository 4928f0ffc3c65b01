//! Tera rendering of flattened content.

use tera::{Context as TeraContext, Tera};

use crate::core::HelperError;

/// Name Tera gives to templates rendered through `render_str`.
const ONE_OFF_NAME: &str = "__tera_one_off";

/// Renders template strings against a built context.
///
/// Autoescaping is off: the output is whatever the template author writes,
/// and field values are passed through untouched.
pub struct TemplateRenderer {
    tera: Tera,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer {
    pub fn new() -> Self {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        Self {
            tera,
        }
    }

    pub fn render_str(
        &mut self,
        template: &str,
        context: &TeraContext,
    ) -> Result<String, HelperError> {
        self.tera.render_str(template, context).map_err(|e| HelperError::Template {
            message: format_tera_error(&e),
        })
    }
}

/// Flatten a Tera error chain into one readable message.
///
/// Tera wraps the useful message (unknown variable, parse error location) a few
/// levels deep and names one-off templates `__tera_one_off`; both are cleaned up.
pub fn format_tera_error(error: &tera::Error) -> String {
    use std::error::Error;

    let mut all_messages = vec![error.to_string()];
    let mut current_error: Option<&dyn Error> = error.source();
    while let Some(err) = current_error {
        all_messages.push(err.to_string());
        current_error = err.source();
    }

    let messages: Vec<String> = all_messages
        .into_iter()
        .map(|msg| {
            msg.replace(&format!("Failed to render '{ONE_OFF_NAME}'"), "Template rendering failed")
                .replace(&format!("Failed to parse '{ONE_OFF_NAME}'"), "Template syntax error")
                .replace(&format!("'{ONE_OFF_NAME}'"), "template")
                .trim()
                .to_string()
        })
        .filter(|msg| !msg.is_empty())
        .collect();

    messages.join(": ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context(value: serde_json::Value) -> TeraContext {
        TeraContext::from_value(value).unwrap()
    }

    #[test]
    fn test_renders_nested_menu() {
        let ctx = context(json!({
            "menus": { "primary": [
                { "title": "Home", "classes": ["menu-item", "menu-item-1"],
                  "Submenu": [{ "title": "About", "classes": ["menu-item"], "Submenu": [] }] }
            ]}
        }));
        let template = "{% for item in menus.primary %}<li class=\"{{ item.classes | join(sep=' ') }}\">{{ item.title }}{% for sub in item.Submenu %}[{{ sub.title }}]{% endfor %}</li>{% endfor %}";

        let output = TemplateRenderer::new().render_str(template, &ctx).unwrap();
        assert_eq!(output, "<li class=\"menu-item menu-item-1\">Home[About]</li>");
    }

    #[test]
    fn test_no_autoescape() {
        let ctx = context(json!({ "post": { "content": "<p>Hi & bye</p>" } }));
        let output = TemplateRenderer::new().render_str("{{ post.content }}", &ctx).unwrap();
        assert_eq!(output, "<p>Hi & bye</p>");
    }

    #[test]
    fn test_unknown_variable_is_template_error() {
        let err =
            TemplateRenderer::new().render_str("{{ nope.value }}", &context(json!({}))).unwrap_err();
        let HelperError::Template {
            message,
        } = err
        else {
            panic!("expected template error");
        };
        assert!(message.contains("nope.value"));
        assert!(!message.contains(ONE_OFF_NAME));
    }

    #[test]
    fn test_syntax_error_is_reported() {
        let err = TemplateRenderer::new().render_str("{% if %}", &context(json!({}))).unwrap_err();
        assert!(err.to_string().starts_with("Template error:"));
    }
}
