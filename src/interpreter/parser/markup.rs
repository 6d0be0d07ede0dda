use std::iter::Peekable;

use crate::{
    ast::{AttrValue, Attribute, Expr, MarkupTag},
    error::ParseError,
    interpreter::{
        lexer::{Lexeme, Token, tag_name},
        parser::{
            core::{ParseResult, parse_expression},
            utils::expect,
        },
    },
};

/// Elements that never have content or a closing tag, even without `/>`.
pub const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "meta", "link", "area", "base",
                                     "col", "embed", "source", "track", "wbr"];

/// Parses a markup element whose opening span has just been consumed.
///
/// The tag name and attributes are re-derived from the raw span text. Unless
/// the element is self-closing, the following tokens are consumed as children
/// until the closing span with the same tag name, which is consumed too. A
/// closing span for any other name, or the end of the input, also ends the
/// element; such a span is left for an enclosing element to match.
///
/// - nested opening spans recurse,
/// - markup comments and raw code blocks become their own nodes,
/// - string literals become text,
/// - `( expression )` embeds an expression,
/// - any other run of tokens becomes text. Tokens that touch in the source are
///   joined directly, separated ones with a single space.
///
/// # Parameters
/// - `tokens`: Token iterator positioned after the opening span.
/// - `raw`: The raw opening span, e.g. `<div class="card">`.
/// - `end`: Byte offset where the opening span ends.
/// - `line`: Line of the opening span.
///
/// # Returns
/// An `Expr::Markup` node.
///
/// # Errors
/// `InvalidMarkup` if no tag name can be read or the span is a closing span.
pub fn parse_markup<'a, I>(tokens: &mut Peekable<I>,
                           raw: &str,
                           end: usize,
                           line: usize)
                           -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let (tag, _) = parse_element(tokens, raw, end, line)?;
    Ok(Expr::Markup { tag, line })
}

/// Parses one element; also returns the byte offset where it ends.
fn parse_element<'a, I>(tokens: &mut Peekable<I>,
                        raw: &str,
                        end: usize,
                        line: usize)
                        -> ParseResult<(MarkupTag, usize)>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let name = tag_name(raw);
    if name.is_empty() || raw.starts_with("</") {
        return Err(ParseError::InvalidMarkup { text: raw.to_string(),
                                               line });
    }

    let attributes = parse_attributes(attribute_text(raw, name));
    let self_closing = raw.ends_with("/>") || VOID_ELEMENTS.contains(&name);
    let mut tag = MarkupTag { name: name.to_string(),
                              attributes,
                              children: Vec::new(),
                              self_closing };
    if self_closing {
        return Ok((tag, end));
    }

    let mut last_end = end;
    loop {
        let Some(&next) = tokens.peek() else {
            return Ok((tag, last_end));
        };
        match &next.token {
            Token::Eof => return Ok((tag, last_end)),
            Token::MarkupTag(closing) if closing.starts_with("</") => {
                if tag_name(closing) != tag.name {
                    return Ok((tag, last_end));
                }
                tokens.next();
                return Ok((tag, next.span.end));
            },
            Token::MarkupTag(nested) => {
                tokens.next();
                let (child, child_end) = parse_element(tokens, nested, next.span.end, next.line)?;
                tag.children.push(Expr::Markup { tag:  child,
                                                 line: next.line, });
                last_end = child_end;
            },
            Token::MarkupComment(text) => {
                tokens.next();
                tag.children.push(Expr::MarkupComment { text: text.clone(),
                                                        line: next.line, });
                last_end = next.span.end;
            },
            Token::CodeBlock(code) => {
                tokens.next();
                tag.children.push(Expr::RawCode { code: code.clone(),
                                                  line: next.line, });
                last_end = next.span.end;
            },
            Token::Str(text) => {
                tokens.next();
                tag.children.push(Expr::text(text.clone(), next.line));
                last_end = next.span.end;
            },
            Token::LParen => {
                tokens.next();
                let expr = parse_expression(tokens)?;
                let close = expect(tokens, &Token::RParen, "')' after embedded expression")?;
                tag.children.push(expr);
                last_end = close.span.end;
            },
            _ => {
                let leading_gap = !tag.children.is_empty() && next.span.start > last_end;
                let (text, run_end) = parse_text_run(tokens);
                let trailing_gap = tokens.peek().is_some_and(|after| {
                                                    !is_closing_span(&after.token)
                                                    && after.token != Token::Eof
                                                    && after.span.start > run_end
                                                });
                let mut content = String::new();
                if leading_gap {
                    content.push(' ');
                }
                content.push_str(&text);
                if trailing_gap {
                    content.push(' ');
                }
                tag.children.push(Expr::text(content, next.line));
                last_end = run_end;
            },
        }
    }
}

/// Collects consecutive plain tokens into one text string.
///
/// Returns the text and the byte offset where the run ends.
fn parse_text_run<'a, I>(tokens: &mut Peekable<I>) -> (String, usize)
    where I: Iterator<Item = &'a Lexeme>
{
    let mut text = String::new();
    let mut end = None;
    while let Some(&next) = tokens.peek()
          && is_text_token(&next.token)
    {
        if let Some(previous_end) = end
           && next.span.start > previous_end
        {
            text.push(' ');
        }
        text.push_str(&next.text);
        end = Some(next.span.end);
        tokens.next();
    }
    (text, end.unwrap_or_default())
}

/// Tokens that are read as plain text inside an element.
const fn is_text_token(token: &Token) -> bool {
    !matches!(token,
              Token::MarkupTag(_)
              | Token::MarkupComment(_)
              | Token::CodeBlock(_)
              | Token::Str(_)
              | Token::LParen
              | Token::Eof)
}

fn is_closing_span(token: &Token) -> bool {
    matches!(token, Token::MarkupTag(raw) if raw.starts_with("</"))
}

/// Returns the part of an opening span between the tag name and the final
/// `>` or `/>`.
fn attribute_text<'r>(raw: &'r str, name: &str) -> &'r str {
    let start = raw.find(name).map_or(raw.len(), |i| i + name.len());
    let body = raw[start..].trim_end_matches('>');
    body.strip_suffix('/').unwrap_or(body)
}

/// Parses markup attributes from the text after the tag name.
///
/// Accepted forms, separated by whitespace: `name`, `name="value"`,
/// `name='value'` and `name=value`. Attribute names may contain letters,
/// digits, `-`, `_` and `:`. Characters that cannot start a name are skipped.
///
/// # Example
/// ```
/// use nixi::{
///     ast::AttrValue,
///     interpreter::parser::markup::parse_attributes,
/// };
///
/// let attributes = parse_attributes(r#" class="card" hidden id=main"#);
/// assert_eq!(attributes.len(), 3);
/// assert_eq!(attributes[0].value, AttrValue::Text("card".to_string()));
/// assert_eq!(attributes[1].value, AttrValue::Flag);
/// assert_eq!(attributes[2].value, AttrValue::Text("main".to_string()));
/// ```
#[must_use]
pub fn parse_attributes(text: &str) -> Vec<Attribute> {
    let mut attributes = Vec::new();
    let mut rest = text;

    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }

        let name_len = rest.find(|c: char| !is_attribute_name_char(c))
                           .unwrap_or(rest.len());
        if name_len == 0 {
            let skip = rest.chars().next().map_or(1, char::len_utf8);
            rest = &rest[skip..];
            continue;
        }
        let name = rest[..name_len].to_string();
        rest = &rest[name_len..];

        let Some(after_equals) = rest.trim_start().strip_prefix('=') else {
            attributes.push(Attribute { name,
                                        value: AttrValue::Flag });
            continue;
        };
        let after_equals = after_equals.trim_start();

        let (value, remaining) = match after_equals.chars().next() {
            Some(quote @ ('"' | '\'')) => {
                let inner = &after_equals[1..];
                let close = inner.find(quote).unwrap_or(inner.len());
                let remaining = inner.get(close + 1..).unwrap_or("");
                (&inner[..close], remaining)
            },
            _ => {
                let len = after_equals.find(char::is_whitespace)
                                      .unwrap_or(after_equals.len());
                (&after_equals[..len], &after_equals[len..])
            },
        };
        attributes.push(Attribute { name,
                                    value: AttrValue::Text(value.replace("\\>", ">")) });
        rest = remaining;
    }

    attributes
}

fn is_attribute_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '_' | ':')
}
