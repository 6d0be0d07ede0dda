use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{CssRule, Expr, LiteralValue, ParamSpec, RecordEntry, UnaryOperator},
    error::ParseError,
    interpreter::{
        evaluator::utils::is_reserved_identifier,
        lexer::{Keyword, Lexeme, Token},
        parser::{
            core::{ParseResult, parse_expression, parse_if, parse_let},
            markup::parse_markup,
            style::{parse_declarations, parse_style_sheet},
            utils::{
                eat, expect, is_argument_start, parse_binding_name, parse_separated, unexpected,
            },
        },
    },
    util::num::i64_to_f64_checked,
};

/// Parses a unary expression.
///
/// Handles prefix operators `-` and `!`, which may be stacked (`!!x`, `--x`).
/// Falls through to [`parse_postfix`] when no prefix operator is present.
///
/// The rule is: `unary := ("-" | "!") unary | postfix`
///
/// # Parameters
/// - `tokens`: Token iterator.
///
/// # Returns
/// An `Expr::UnaryOp`, or the postfix expression.
pub fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let op = match tokens.peek() {
        Some(Lexeme { token: Token::Minus,
                      .. }) => UnaryOperator::Negate,
        Some(Lexeme { token: Token::Bang, .. }) => UnaryOperator::Not,
        _ => return parse_postfix(tokens, true),
    };
    let line = tokens.next().map_or(0, |lexeme| lexeme.line);
    let expr = parse_unary(tokens)?;

    Ok(Expr::UnaryOp { op,
                       expr: Box::new(expr),
                       line })
}

/// Parses call and postfix forms.
///
/// After a primary expression, any number of the following may follow:
/// - `(a, b)`: a call with an explicit argument list.
/// - `.name`: property access.
/// - `{ ... }` on the same line: a record argument. An identifier callee makes
///   this a component instantiation, any other callee a one-argument call.
/// - a style block right after an identifier (`body{margin: 0}`): a style rule
///   using the identifier as selector.
/// - when `juxtapose` is set, argument-starting tokens on the callee's line: a
///   juxtaposition call (`echo "a" 5`). Each argument is parsed at this level
///   without juxtaposition, so `f x y` is `f(x, y)`. Literals never act as
///   callees.
///
/// The rule is: `postfix := primary (call | "." IDENT | record | args)*`
pub fn parse_postfix<'a, I>(tokens: &mut Peekable<I>, juxtapose: bool) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let mut expr = parse_primary(tokens)?;

    while let Some(&next) = tokens.peek() {
        let line = expr.line_number();
        match &next.token {
            Token::LParen => {
                tokens.next();
                let arguments = parse_separated(tokens, parse_expression, &Token::RParen, false)?;
                expr = Expr::Call { callee: Box::new(expr),
                                    arguments,
                                    line };
            },
            Token::Dot => {
                tokens.next();
                let property = match tokens.next() {
                    Some(Lexeme { token: Token::Identifier(name),
                                  .. }) => name.clone(),
                    Some(Lexeme { token: Token::Keyword(keyword),
                                  .. }) => keyword.as_str().to_string(),
                    other => return Err(unexpected(other, "property name after '.'")),
                };
                expr = Expr::PropertyAccess { object: Box::new(expr),
                                              property,
                                              line };
            },
            Token::LBrace if next.line == line && !starts_named_params(tokens.clone()) => {
                let record_line = next.line;
                tokens.next();
                let props = parse_record(tokens, record_line)?;
                expr = if matches!(expr, Expr::Identifier { .. }) {
                    Expr::Instantiate { component: Box::new(expr),
                                        props: Box::new(props),
                                        line }
                } else {
                    Expr::Call { callee: Box::new(expr),
                                 arguments: vec![props],
                                 line }
                };
            },
            Token::StyleBlock(text) if matches!(expr, Expr::Identifier { .. }) => {
                let rule = CssRule { selector:   expr.to_string(),
                                     properties: parse_declarations(text), };
                tokens.next();
                expr = Expr::StyleRule { rule, line };
            },
            token if juxtapose
                     && is_argument_start(token)
                     && next.line == line
                     && !matches!(expr, Expr::Literal { .. }) =>
            {
                let mut arguments = Vec::new();
                while let Some(&next) = tokens.peek()
                      && is_argument_start(&next.token)
                      && next.line == line
                {
                    arguments.push(parse_postfix(tokens, false)?);
                }
                expr = Expr::Call { callee: Box::new(expr),
                                    arguments,
                                    line };
            },
            _ => break,
        }
    }

    Ok(expr)
}

/// Parses a primary expression.
///
/// Primary expressions are:
/// - literals: integers, floats, strings, `true`, `false`, `null`,
/// - identifiers, and single-parameter lambdas `x: body`,
/// - records `{ k: v }` and named-parameter lambdas `{ a, b }: body`,
/// - arrays `[a, b]`,
/// - parenthesized expressions,
/// - `if` and `let` expressions,
/// - markup spans, markup comments, style blocks and raw code blocks,
/// - an element keyword followed by a style block (`body{ margin: 0 }`).
///
/// # Errors
/// Returns `UnexpectedToken` / `UnexpectedEndOfInput` for anything else, and
/// `LiteralTooLarge` for integers beyond the exactly representable range.
pub fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let Some(lexeme) = tokens.next() else {
        return Err(unexpected(None, "expression"));
    };
    let line = lexeme.line;

    match &lexeme.token {
        Token::Integer(n) => {
            i64_to_f64_checked(*n, ParseError::LiteralTooLarge { line })?;
            Ok(Expr::Literal { value: LiteralValue::Integer(*n),
                               line })
        },
        Token::Float(x) => Ok(Expr::Literal { value: LiteralValue::Float(*x),
                                              line }),
        Token::Str(s) => Ok(Expr::text(s.clone(), line)),
        Token::Keyword(Keyword::True) => Ok(Expr::Literal { value: true.into(),
                                                            line }),
        Token::Keyword(Keyword::False) => Ok(Expr::Literal { value: false.into(),
                                                             line }),
        Token::Keyword(Keyword::Null) => Ok(Expr::Literal { value: LiteralValue::Null,
                                                            line }),
        Token::Identifier(name) => {
            if let Some(Lexeme { token: Token::Colon,
                                 .. }) = tokens.peek()
            {
                if is_reserved_identifier(name) {
                    return Err(ParseError::IdentifierReserved { name: name.clone(),
                                                                line });
                }
                tokens.next();
                let body = parse_expression(tokens)?;
                return Ok(Expr::Lambda { params: ParamSpec::Positional(vec![name.clone()]),
                                         body: Rc::new(body),
                                         line });
            }
            Ok(Expr::Identifier { name: name.clone(),
                                  line })
        },
        Token::LBrace => {
            if starts_named_params_after_brace(tokens.clone()) {
                let params = parse_named_params(tokens)?;
                expect(tokens, &Token::Colon, "':' after parameters")?;
                let body = parse_expression(tokens)?;
                return Ok(Expr::Lambda { params,
                                         body: Rc::new(body),
                                         line });
            }
            parse_record(tokens, line)
        },
        Token::LBracket => {
            let elements = parse_separated(tokens, parse_expression, &Token::RBracket, true)?;
            Ok(Expr::Array { elements, line })
        },
        Token::LParen => {
            let expr = parse_expression(tokens)?;
            expect(tokens, &Token::RParen, "')' after expression")?;
            Ok(expr)
        },
        Token::Keyword(Keyword::If) => parse_if(tokens, line),
        Token::Keyword(Keyword::Let) => parse_let(tokens, line),
        Token::MarkupTag(raw) => parse_markup(tokens, raw, lexeme.span.end, line),
        Token::MarkupComment(text) => Ok(Expr::MarkupComment { text: text.clone(),
                                                               line }),
        Token::CodeBlock(code) => Ok(Expr::RawCode { code: code.clone(),
                                                     line }),
        Token::StyleBlock(text) => {
            if !text.contains('{') {
                return Err(ParseError::InvalidStyleRule { text: text.clone(),
                                                          line });
            }
            Ok(Expr::StyleSheet { rules: parse_style_sheet(text, line)?,
                                  line })
        },
        Token::Keyword(keyword) if keyword.is_element_name() => match tokens.peek() {
            Some(Lexeme { token: Token::StyleBlock(text),
                          .. }) => {
                let rule = CssRule { selector:   keyword.as_str().to_string(),
                                     properties: parse_declarations(text), };
                tokens.next();
                Ok(Expr::StyleRule { rule, line })
            },
            _ => Err(unexpected(Some(lexeme), "expression")),
        },
        _ => Err(unexpected(Some(lexeme), "expression")),
    }
}

/// Parses the entries of a record literal after its opening `{`.
///
/// Keys may be identifiers, keywords or strings, and are separated from the
/// value by `:` or `=`. Entries are separated by `,` or `;`, and a trailing
/// separator is allowed. Duplicate keys are kept; the last one wins at runtime.
///
/// # Parameters
/// - `tokens`: Token iterator positioned after `{`.
/// - `line`: Line of the opening brace.
pub fn parse_record<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let entries = parse_separated(tokens, parse_record_entry, &Token::RBrace, true)?;
    Ok(Expr::Record { entries, line })
}

fn parse_record_entry<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<RecordEntry>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let key = match tokens.next() {
        Some(Lexeme { token: Token::Identifier(name) | Token::Str(name),
                      .. }) => name.clone(),
        Some(Lexeme { token: Token::Keyword(keyword),
                      .. }) => keyword.as_str().to_string(),
        other => return Err(unexpected(other, "record key")),
    };
    match tokens.next() {
        Some(Lexeme { token: Token::Colon | Token::Equals,
                      .. }) => {},
        other => return Err(unexpected(other, "':' or '=' after record key")),
    }
    let value = parse_expression(tokens)?;
    Ok(RecordEntry { key, value })
}

/// Parses `a, b, c }` after the opening brace of a named parameter list.
pub(in crate::interpreter::parser) fn parse_named_params<'a, I>(tokens: &mut Peekable<I>)
                                                                -> ParseResult<ParamSpec>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let names = parse_separated(tokens,
                                |tokens| parse_binding_name(tokens, "parameter name"),
                                &Token::RBrace,
                                false)?;
    Ok(ParamSpec::Named(names))
}

/// Looks ahead (without consuming) for `{ ident (, ident)* } :` starting at
/// the opening brace.
fn starts_named_params<'a, I>(mut tokens: Peekable<I>) -> bool
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    eat(&mut tokens, &Token::LBrace) && starts_named_params_after_brace(tokens)
}

/// Like [`starts_named_params`], positioned after the opening brace.
fn starts_named_params_after_brace<'a, I>(mut tokens: Peekable<I>) -> bool
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    loop {
        match tokens.next().map(|lexeme| &lexeme.token) {
            Some(Token::RBrace) => break,
            Some(Token::Identifier(_)) => match tokens.next().map(|lexeme| &lexeme.token) {
                Some(Token::Comma) => {},
                Some(Token::RBrace) => break,
                _ => return false,
            },
            _ => return false,
        }
    }
    eat(&mut tokens, &Token::Colon)
}
