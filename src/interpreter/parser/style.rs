use crate::{
    ast::{CssRule, StyleProperty},
    error::ParseError,
    interpreter::parser::core::ParseResult,
};

/// Splits a declaration list into ordered property/value pairs.
///
/// Declarations are separated by `;`; each one is split at its first `:`.
/// Names and values are trimmed, and pairs where either side is empty are
/// dropped.
///
/// # Example
/// ```
/// use nixi::interpreter::parser::style::parse_declarations;
///
/// let properties = parse_declarations(" color: red; margin : 0 4px ;broken; ");
/// assert_eq!(properties.len(), 2);
/// assert_eq!(properties[1].name, "margin");
/// assert_eq!(properties[1].value, "0 4px");
/// ```
#[must_use]
pub fn parse_declarations(text: &str) -> Vec<StyleProperty> {
    text.split(';')
        .filter_map(|declaration| {
            let (name, value) = declaration.split_once(':')?;
            let (name, value) = (name.trim(), value.trim());
            (!name.is_empty() && !value.is_empty()).then(|| StyleProperty { name:  name.to_string(),
                                                                            value: value.to_string(), })
        })
        .collect()
}

/// Splits style-sheet text into rules of the form `selector { declarations }`.
///
/// Braces inside a rule body are balanced, so a body never ends early.
///
/// # Parameters
/// - `text`: The sheet text, without the enclosing braces of the span.
/// - `line`: Line of the span, for error reporting.
///
/// # Errors
/// `InvalidStyleRule` when a rule has an empty selector, a body is never
/// closed, or text is left over after the last rule.
pub fn parse_style_sheet(text: &str, line: usize) -> ParseResult<Vec<CssRule>> {
    let invalid = |fragment: &str| ParseError::InvalidStyleRule { text: fragment.trim().to_string(),
                                                                  line };
    let mut rules = Vec::new();
    let mut rest = text;

    while !rest.trim().is_empty() {
        let Some(open) = rest.find('{') else {
            return Err(invalid(rest));
        };
        let selector = rest[..open].trim();
        if selector.is_empty() {
            return Err(invalid(rest));
        }

        let body = &rest[open + 1..];
        let mut depth = 1usize;
        let mut close = None;
        for (i, byte) in body.bytes().enumerate() {
            match byte {
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        close = Some(i);
                        break;
                    }
                },
                _ => {},
            }
        }
        let Some(close) = close else {
            return Err(invalid(rest));
        };

        rules.push(CssRule { selector:   selector.to_string(),
                             properties: parse_declarations(&body[..close]), });
        rest = &body[close + 1..];
    }

    Ok(rules)
}
