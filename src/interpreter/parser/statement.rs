use std::{iter::Peekable, rc::Rc};

use log::debug;

use crate::{
    ast::{CssRule, Expr, MarkupTag, ParamSpec, Program, StyleProperty},
    error::ParseError,
    interpreter::{
        lexer::{Keyword, Lexeme, Token},
        parser::{
            core::{ParseResult, parse_expression, parse_if, parse_let},
            markup::parse_markup,
            style::{parse_declarations, parse_style_sheet},
            unary::parse_named_params,
            utils::{eat, expect, parse_binding_name, unexpected},
        },
    },
};

/// Parses a whole token sequence into a [`Program`].
///
/// Statements are parsed one after another until the end-of-input token.
/// Parsing stops at the first error; no partial program is returned.
///
/// # Example
/// ```
/// use nixi::interpreter::{lexer::tokenize, parser::statement::parse_program};
///
/// let tokens = tokenize("let x = 5; in x + 10").unwrap();
/// let program = parse_program(&tokens).unwrap();
/// assert_eq!(program.statements.len(), 1);
/// ```
pub fn parse_program(tokens: &[Lexeme]) -> ParseResult<Program> {
    let mut iter = tokens.iter().peekable();
    let mut statements = Vec::new();

    while let Some(lexeme) = iter.peek() {
        if lexeme.token == Token::Eof {
            break;
        }
        statements.push(parse_statement(&mut iter)?);
    }

    debug!("parsed {} statement(s)", statements.len());
    Ok(Program { statements })
}

/// Parses a single top-level statement.
///
/// A statement may be one of:
/// - a let-expression,
/// - a component definition,
/// - a style definition,
/// - an `html`, `css` or `js` document,
/// - a conditional,
/// - an expression.
///
/// Keyword-introduced forms are recognized first; everything else is parsed
/// as an expression. A trailing `;` is consumed if present.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of a statement.
///
/// # Returns
/// The statement as an [`Expr`] node.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let Some(&lexeme) = tokens.peek() else {
        return Err(unexpected(None, "statement"));
    };
    let line = lexeme.line;

    let statement = match lexeme.token {
        Token::Keyword(Keyword::Let) => {
            tokens.next();
            parse_let(tokens, line)?
        },
        Token::Keyword(Keyword::Component) => {
            tokens.next();
            parse_component(tokens, line)?
        },
        Token::Keyword(Keyword::Style) => {
            tokens.next();
            parse_style_definition(tokens, line)?
        },
        Token::Keyword(Keyword::Html) => {
            tokens.next();
            parse_html_document(tokens, line)?
        },
        Token::Keyword(Keyword::Css) => {
            tokens.next();
            parse_css_document(tokens, line)?
        },
        Token::Keyword(Keyword::Js) => {
            tokens.next();
            parse_js_document(tokens, line)?
        },
        Token::Keyword(Keyword::If) => {
            tokens.next();
            parse_if(tokens, line)?
        },
        _ => parse_expression(tokens)?,
    };

    eat(tokens, &Token::Semicolon);
    Ok(statement)
}

/// Parses `Name = params : body` after the `component` keyword.
///
/// Parameters are either a possibly empty run of identifiers (positional) or a
/// braced, comma-separated list (named).
///
/// # Errors
/// - `IdentifierReserved` if the name or a parameter is a built-in.
/// - `UnexpectedToken` for a missing `=` or `:`.
fn parse_component<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let name = parse_binding_name(tokens, "component name")?;
    expect(tokens, &Token::Equals, "'=' after component name")?;

    let params = if eat(tokens, &Token::LBrace) {
        parse_named_params(tokens)?
    } else {
        let mut names = Vec::new();
        while let Some(Lexeme { token: Token::Identifier(_),
                                .. }) = tokens.peek()
        {
            names.push(parse_binding_name(tokens, "parameter name")?);
        }
        ParamSpec::Positional(names)
    };

    expect(tokens, &Token::Colon, "':' after component parameters")?;
    let body = parse_expression(tokens)?;

    Ok(Expr::Component { name,
                         params,
                         body: Rc::new(body),
                         line })
}

/// Parses `"selector" { prop: "value"; ... }` after the `style` keyword.
///
/// Property names are identifiers, optionally prefixed with `-` for vendor
/// names (`-webkit-appearance`). Values must be string literals. The `;`
/// after the last property is optional.
fn parse_style_definition<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let selector = match tokens.next() {
        Some(Lexeme { token: Token::Str(selector),
                      .. }) => selector.clone(),
        other => return Err(unexpected(other, "style selector")),
    };
    expect(tokens, &Token::LBrace, "'{' after style selector")?;

    let mut properties = Vec::new();
    while !eat(tokens, &Token::RBrace) {
        let mut name = String::new();
        loop {
            match tokens.next() {
                Some(Lexeme { token: Token::Minus,
                              .. }) => name.push('-'),
                Some(Lexeme { token: Token::Identifier(part),
                              .. }) => {
                    name.push_str(part);
                    break;
                },
                other => return Err(unexpected(other, "property name")),
            }
        }
        expect(tokens, &Token::Colon, "':' after property name")?;
        let value = match tokens.next() {
            Some(Lexeme { token: Token::Str(value),
                          .. }) => value.clone(),
            other => return Err(unexpected(other, "property value")),
        };
        properties.push(StyleProperty { name, value });

        if !eat(tokens, &Token::Semicolon)
           && !matches!(tokens.peek(),
                        Some(Lexeme { token: Token::RBrace,
                                      .. }))
        {
            return Err(unexpected(tokens.next(), "';' or '}' after property"));
        }
    }

    Ok(Expr::StyleDefinition { selector,
                               properties,
                               line })
}

/// Parses the markup spans following the `html` keyword into a single `html`
/// element.
fn parse_html_document<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let mut children = Vec::new();
    while let Some(&next) = tokens.peek() {
        match &next.token {
            Token::MarkupTag(raw) => {
                tokens.next();
                children.push(parse_markup(tokens, raw, next.span.end, next.line)?);
            },
            Token::MarkupComment(text) => {
                tokens.next();
                children.push(Expr::MarkupComment { text: text.clone(),
                                                    line: next.line, });
            },
            _ => break,
        }
    }

    Ok(Expr::Markup { tag: MarkupTag { name: "html".to_string(),
                                       attributes: Vec::new(),
                                       children,
                                       self_closing: false },
                      line })
}

/// Parses the style spans following the `css` keyword into one sheet.
///
/// Accepts bare sheet spans (`css{ .a { ... } }`) and selector-prefixed rule
/// spans (`body{ ... }`), in any order.
fn parse_css_document<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let mut rules = Vec::new();
    loop {
        let mut lookahead = tokens.clone();
        match lookahead.next().map(|lexeme| (&lexeme.token, lexeme.line)) {
            Some((Token::StyleBlock(text), span_line)) => {
                tokens.next();
                rules.extend(parse_style_sheet(text, span_line)?);
            },
            Some((Token::Identifier(_) | Token::Keyword(_), _))
                if matches!(lookahead.peek(),
                            Some(Lexeme { token: Token::StyleBlock(_),
                                          .. })) =>
            {
                let selector = tokens.next().map(|lexeme| lexeme.text.clone())
                                     .unwrap_or_default();
                if let Some(Lexeme { token: Token::StyleBlock(text),
                                     .. }) = tokens.next()
                {
                    rules.push(CssRule { selector,
                                         properties: parse_declarations(text) });
                }
            },
            _ => break,
        }
    }

    if rules.is_empty() {
        return Err(unexpected(tokens.peek().copied(), "style block after css"));
    }
    Ok(Expr::StyleSheet { rules, line })
}

/// Parses the script elements (or bare code blocks) following the `js`
/// keyword into one raw-code node. Multiple blocks are joined by newlines.
fn parse_js_document<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let mut blocks = Vec::new();
    let mut found = false;
    while let Some(&next) = tokens.peek() {
        match &next.token {
            Token::CodeBlock(code) => {
                tokens.next();
                blocks.push(code.clone());
                found = true;
            },
            Token::MarkupTag(raw) if !raw.starts_with("</") => {
                tokens.next();
                let Expr::Markup { tag, .. } = parse_markup(tokens, raw, next.span.end, next.line)?
                else {
                    break;
                };
                blocks.extend(tag.children.into_iter().filter_map(|child| match child {
                                                                       Expr::RawCode { code, .. } => Some(code),
                                                                       _ => None,
                                                                   }));
                found = true;
            },
            _ => break,
        }
    }

    if !found {
        return Err(ParseError::UnexpectedToken { expected: "script block after js".to_string(),
                                                 found:    tokens.peek()
                                                                 .map_or_else(|| "end of input".to_string(),
                                                                              |lexeme| lexeme.token.to_string()),
                                                 line });
    }
    Ok(Expr::RawCode { code: blocks.join("\n"),
                       line })
}
