use std::iter::Peekable;

use crate::{
    ast::{Binding, Expr},
    error::ParseError,
    interpreter::{
        lexer::{Keyword, Lexeme, Token},
        parser::{
            binary::parse_assignment,
            utils::{expect, parse_binding_name},
        },
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a full expression.
///
/// This is the entry point for expression parsing.
/// It begins at the lowest-precedence level, assignment, and recursively
/// descends through the precedence hierarchy.
///
/// Grammar: `expression := assignment`
///
/// # Parameters
/// - `tokens`: Token iterator over [`Lexeme`]s.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    parse_assignment(tokens)
}

/// Parses a conditional expression.
///
/// Syntax:
/// ```text
///     if (<condition>) then <expr> else <expr>
/// ```
/// Both branches are required. The parentheses around the condition are part
/// of the syntax, not a grouping.
///
/// # Parameters
/// - `tokens`: Token stream positioned after the `if` keyword.
/// - `line`: Line number of the `if` token.
///
/// # Returns
/// An `Expr::Conditional` node.
///
/// # Errors
/// - `UnexpectedToken` if `(`, `)`, `then` or `else` is missing.
/// - Propagates any errors from sub-expression parsing.
pub fn parse_if<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    expect(tokens, &Token::LParen, "'(' after if")?;
    let condition = parse_expression(tokens)?;
    expect(tokens, &Token::RParen, "')' after condition")?;

    expect(tokens, &Token::Keyword(Keyword::Then), "'then' after condition")?;
    let then_branch = parse_expression(tokens)?;

    expect(tokens, &Token::Keyword(Keyword::Else), "'else' after then branch")?;
    let else_branch = parse_expression(tokens)?;

    Ok(Expr::Conditional { condition: Box::new(condition),
                           then_branch: Box::new(then_branch),
                           else_branch: Box::new(else_branch),
                           line })
}

/// Parses the bindings and body of a let-expression.
///
/// Syntax:
/// ```text
///     let a = 1; b = a + 1; in a + b
/// ```
/// The `;` after a binding is optional; the bindings end at `in`.
///
/// # Parameters
/// - `tokens`: Token stream positioned after the `let` keyword.
/// - `line`: Line number of the `let` token.
///
/// # Errors
/// - `UnexpectedToken` if a binding is malformed or `in` is missing.
/// - `IdentifierReserved` if a binding shadows a built-in.
pub fn parse_let<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let mut bindings = Vec::new();
    loop {
        let binding_line = tokens.peek().map_or(line, |lexeme| lexeme.line);
        let name = parse_binding_name(tokens, "identifier after let")?;
        expect(tokens, &Token::Equals, "'=' after identifier")?;
        let value = parse_expression(tokens)?;
        bindings.push(Binding { name,
                                value,
                                line: binding_line });

        if let Some(Lexeme { token: Token::Semicolon,
                             .. }) = tokens.peek()
        {
            tokens.next();
        }
        if let Some(Lexeme { token: Token::Keyword(Keyword::In),
                             .. }) = tokens.peek()
        {
            break;
        }
    }

    expect(tokens, &Token::Keyword(Keyword::In), "'in' after let bindings")?;
    let body = parse_expression(tokens)?;

    Ok(Expr::Let { bindings,
                   body: Box::new(body),
                   line })
}
