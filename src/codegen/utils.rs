use std::fmt::Write as _;

/// Quotes `text` as a JavaScript string literal.
///
/// Quotes, backslashes and control characters are escaped, as are the two
/// line separators JavaScript treats as line terminators inside literals.
///
/// # Example
/// ```
/// use nixi::codegen::utils::js_string;
///
/// assert_eq!(js_string("say \"hi\"\n"), r#""say \"hi\"\n""#);
/// ```
#[must_use]
pub fn js_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", u32::from(c));
            },
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Turns a source identifier into a valid JavaScript identifier fragment.
///
/// Source identifiers may contain `-`, which JavaScript does not allow; it is
/// mapped to `$`, a character source identifiers never contain.
///
/// # Example
/// ```
/// use nixi::codegen::utils::mangle;
///
/// assert_eq!(mangle("card-title"), "card$title");
/// ```
#[must_use]
pub fn mangle(name: &str) -> String {
    name.replace('-', "$")
}

/// The JavaScript binding a declared component is emitted under.
#[must_use]
pub fn component_binding(name: &str) -> String {
    format!("component_{}", mangle(name))
}
