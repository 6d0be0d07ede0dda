use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{
        evaluator::utils::is_reserved_identifier,
        lexer::{Lexeme, Token},
        parser::core::ParseResult,
    },
};

/// Builds the error for a token the grammar did not expect.
///
/// The end-of-input token is reported as [`ParseError::UnexpectedEndOfInput`]
/// so that unterminated constructs read naturally.
///
/// # Parameters
/// - `lexeme`: The offending token, if any.
/// - `expected`: Description of what the parser was looking for.
pub(in crate::interpreter::parser) fn unexpected(lexeme: Option<&Lexeme>,
                                                 expected: &str)
                                                 -> ParseError {
    match lexeme {
        Some(Lexeme { token: Token::Eof,
                      line,
                      .. }) => ParseError::UnexpectedEndOfInput { expected: expected.to_string(),
                                                                  line:     *line, },
        Some(lexeme) => ParseError::UnexpectedToken { expected: expected.to_string(),
                                                      found:    lexeme.token.to_string(),
                                                      line:     lexeme.line, },
        None => ParseError::UnexpectedEndOfInput { expected: expected.to_string(),
                                                   line:     0, },
    }
}

/// Consumes the next token, which must equal `expected`.
///
/// # Parameters
/// - `tokens`: Token iterator.
/// - `expected`: The required token.
/// - `description`: How the token is named in the error message.
///
/// # Returns
/// The consumed lexeme.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    expected: &Token,
                                                    description: &str)
                                                    -> ParseResult<&'a Lexeme>
    where I: Iterator<Item = &'a Lexeme>
{
    match tokens.next() {
        Some(lexeme) if lexeme.token == *expected => Ok(lexeme),
        other => Err(unexpected(other, description)),
    }
}

/// Consumes the next token if it equals `token`.
///
/// # Returns
/// Whether a token was consumed.
pub(in crate::interpreter::parser) fn eat<'a, I>(tokens: &mut Peekable<I>, token: &Token) -> bool
    where I: Iterator<Item = &'a Lexeme>
{
    if check(tokens, token) {
        tokens.next();
        return true;
    }
    false
}

/// Whether the next token equals `token`, without consuming it.
pub(in crate::interpreter::parser) fn check<'a, I>(tokens: &mut Peekable<I>, token: &Token) -> bool
    where I: Iterator<Item = &'a Lexeme>
{
    tokens.peek().is_some_and(|lexeme| lexeme.token == *token)
}

/// Parses a name that is about to be bound (let binding, parameter,
/// component name).
///
/// The next token must be `Token::Identifier`, and the name must not belong to
/// a built-in function.
///
/// # Errors
/// - `UnexpectedToken` if the next token is not an identifier.
/// - `IdentifierReserved` if the name is a built-in.
pub(in crate::interpreter::parser) fn parse_binding_name<'a, I>(tokens: &mut Peekable<I>,
                                                                description: &str)
                                                                -> ParseResult<String>
    where I: Iterator<Item = &'a Lexeme>
{
    match tokens.next() {
        Some(Lexeme { token: Token::Identifier(name),
                      line,
                      .. }) => {
            if is_reserved_identifier(name) {
                return Err(ParseError::IdentifierReserved { name: name.clone(),
                                                            line: *line, });
            }
            Ok(name.clone())
        },
        other => Err(unexpected(other, description)),
    }
}

/// Parses a list of items separated by `,` (or also `;` when
/// `allow_semicolon` is set) until a closing token.
///
/// This utility is shared by array literals, record literals and argument
/// lists. A separator directly before the closing token is tolerated, and an
/// immediately encountered closing token produces an empty list.
///
/// Grammar (simplified): `list := (item (sep item)* sep?)? closing`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first item or closing token.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token that terminates the list (e.g., `]` or `)`).
/// - `allow_semicolon`: Whether `;` is accepted as a separator.
///
/// # Returns
/// A vector of parsed items.
///
/// # Errors
/// Returns a `ParseError` if:
/// - an item fails to parse,
/// - an unexpected token is encountered,
/// - the stream ends before the closing token.
pub(in crate::interpreter::parser) fn parse_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &Token,
    allow_semicolon: bool)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let mut items = Vec::new();
    loop {
        if eat(tokens, closing) {
            break;
        }
        items.push(parse_item(tokens)?);
        match tokens.peek() {
            Some(Lexeme { token: Token::Comma, .. }) => {
                tokens.next();
            },
            Some(Lexeme { token: Token::Semicolon,
                          .. }) if allow_semicolon => {
                tokens.next();
            },
            Some(lexeme) if lexeme.token == *closing => {
                tokens.next();
                break;
            },
            other => {
                let expected = if allow_semicolon {
                    format!("',', ';' or {closing}")
                } else {
                    format!("',' or {closing}")
                };
                return Err(unexpected(other.copied(), &expected));
            },
        }
    }
    Ok(items)
}

/// Whether a token can begin an argument of a juxtaposition call
/// (`echo "hello" 5`).
#[must_use]
pub const fn is_argument_start(token: &Token) -> bool {
    matches!(token,
             Token::Str(_)
             | Token::Integer(_)
             | Token::Float(_)
             | Token::Identifier(_)
             | Token::LParen
             | Token::LBracket)
}
