use std::{fmt::Write as _, io, path::Path};

use log::{debug, info};

use crate::{ast::StyleProperty, interpreter::value::core::Value};

/// The presentation collaborator the evaluator reports markup and styles to.
///
/// Calls arrive in program order. The evaluator never inspects what an
/// implementation does with the text it receives.
pub trait Presenter {
    /// Renders a structural value (or a markup string) into a full document.
    fn generate_html(&mut self, value: &Value, title: &str) -> String;

    /// Writes rendered text to `path`.
    ///
    /// # Errors
    /// Any I/O error raised while writing.
    fn save_to_file(&mut self, text: &str, path: &Path) -> io::Result<()>;

    /// Registers a selector and its declarations.
    fn add_style(&mut self, selector: &str, properties: &[StyleProperty]);

    /// Registers a complete style rule, already rendered to text.
    fn add_css(&mut self, rule: &str);
}

/// The default presenter: accumulates styles in memory and renders structural
/// values to HTML.
///
/// # Example
/// ```
/// use nixi::{
///     ast::StyleProperty,
///     interpreter::value::core::Value,
///     presenter::{HtmlRenderer, Presenter},
/// };
///
/// let mut renderer = HtmlRenderer::default();
/// renderer.add_style(".card", &[StyleProperty { name:  "color".to_string(),
///                                               value: "red".to_string(), }]);
/// let page = renderer.generate_html(&Value::from("<p>Hi</p>"), "Demo");
///
/// assert!(page.contains("<title>Demo</title>"));
/// assert!(page.contains(".card {\n  color: red;\n}"));
/// assert!(page.contains("<p>Hi</p>"));
/// ```
#[derive(Debug, Default, Clone)]
pub struct HtmlRenderer {
    rules: Vec<String>,
}

impl HtmlRenderer {
    /// The style rules registered so far, in registration order.
    #[must_use]
    pub fn rules(&self) -> &[String] {
        &self.rules
    }
}

impl Presenter for HtmlRenderer {
    fn generate_html(&mut self, value: &Value, title: &str) -> String {
        let mut page = String::new();
        page.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
        page.push_str("  <meta charset=\"UTF-8\">\n");
        page.push_str("  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
        let _ = writeln!(page, "  <title>{}</title>", escape_text(title));
        if !self.rules.is_empty() {
            page.push_str("  <style>\n");
            for rule in &self.rules {
                page.push_str(rule);
                page.push('\n');
            }
            page.push_str("  </style>\n");
        }
        page.push_str("</head>\n<body>\n");
        page.push_str(&render_node(value));
        page.push_str("\n</body>\n</html>\n");
        debug!("rendered document '{title}' ({} bytes)", page.len());
        page
    }

    fn save_to_file(&mut self, text: &str, path: &Path) -> io::Result<()> {
        std::fs::write(path, text)?;
        info!("saved {} bytes to {}", text.len(), path.display());
        Ok(())
    }

    fn add_style(&mut self, selector: &str, properties: &[StyleProperty]) {
        let mut rule = format!("{selector} {{\n");
        for property in properties {
            let _ = writeln!(rule, "  {property}");
        }
        rule.push('}');
        debug!("registered style for '{selector}'");
        self.rules.push(rule);
    }

    fn add_css(&mut self, rule: &str) {
        debug!("registered style rule ({} bytes)", rule.len());
        self.rules.push(rule.to_string());
    }
}

/// Renders one value as HTML.
///
/// - Strings are taken as markup and inserted unchanged.
/// - A record `{ type, props }` becomes an element. `props.children` (one value
///   or an array) and `props.text` form its content; the remaining scalar
///   props become attributes (`true` as a bare name, `false` and `null`
///   omitted).
/// - Arrays render their items one after another.
/// - Anything else is rendered as escaped text.
#[must_use]
pub fn render_node(value: &Value) -> String {
    match value {
        Value::Str(markup) => markup.clone(),
        Value::Array(items) => items.iter().map(render_node).collect(),
        Value::Record(record) => {
            let (Some(Value::Str(kind)), props) = (record.get("type"), record.get("props")) else {
                return escape_text(&value.to_native_string());
            };
            let mut out = format!("<{kind}");
            let mut content = String::new();
            if let Some(Value::Record(props)) = props {
                for (key, prop) in props.iter() {
                    match (key.as_str(), prop) {
                        ("children", child) => content.push_str(&render_node(child)),
                        ("text", text) => content.push_str(&escape_text(&text.to_native_string())),
                        (_, Value::Bool(true)) => {
                            let _ = write!(out, " {key}");
                        },
                        (_, Value::Bool(false) | Value::Null | Value::Function(_)) => {},
                        (_, other) => {
                            let _ = write!(out,
                                           " {key}=\"{}\"",
                                           escape_attribute(&other.to_native_string()));
                        },
                    }
                }
            }
            let _ = write!(out, ">{content}</{kind}>");
            out
        },
        other => escape_text(&other.to_native_string()),
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attribute(text: &str) -> String {
    escape_text(text).replace('"', "&quot;")
}
