use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr},
    error::ParseError,
    interpreter::{
        evaluator::utils::is_reserved_identifier,
        lexer::{Lexeme, Token},
        parser::{core::ParseResult, unary::parse_unary},
    },
};

/// Parses an assignment, the lowest-precedence form.
///
/// Assignment is right-associative: `a = b = 1` parses as `a = (b = 1)`.
/// The target must be a bare identifier that does not name a built-in.
///
/// The rule is: `assignment := logical_or ("=" assignment)?`
///
/// # Errors
/// - `InvalidAssignmentTarget` when the left side is not an identifier.
/// - `IdentifierReserved` when the target is a built-in name.
pub fn parse_assignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let target = parse_logical_or(tokens)?;

    let Some(Lexeme { token: Token::Equals,
                      line,
                      .. }) = tokens.peek()
    else {
        return Ok(target);
    };
    let line = *line;
    tokens.next();
    let value = parse_assignment(tokens)?;

    match &target {
        Expr::Identifier { name, .. } if is_reserved_identifier(name) => {
            Err(ParseError::IdentifierReserved { name: name.clone(),
                                                 line })
        },
        Expr::Identifier { .. } => Ok(Expr::BinaryOp { left: Box::new(target),
                                                       op: BinaryOperator::Assign,
                                                       right: Box::new(value),
                                                       line }),
        _ => Err(ParseError::InvalidAssignmentTarget { line }),
    }
}

/// Parses one left-associative precedence level.
///
/// Repeatedly parses operands with `next_level` and folds them with any
/// operator from `operators` into a left-leaning `Expr::BinaryOp` tree.
fn parse_left_assoc<'a, I>(tokens: &mut Peekable<I>,
                           operators: &[BinaryOperator],
                           next_level: fn(&mut Peekable<I>) -> ParseResult<Expr>)
                           -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let mut left = next_level(tokens)?;
    loop {
        if let Some(lexeme) = tokens.peek()
           && let Some(op) = token_to_binary_operator(&lexeme.token)
           && operators.contains(&op)
        {
            let line = lexeme.line;
            tokens.next();
            let right = next_level(tokens)?;
            left = Expr::BinaryOp { left: Box::new(left),
                                    op,
                                    right: Box::new(right),
                                    line };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses logical OR expressions.
///
/// The rule is: `logical_or := logical_and ("||" logical_and)*`
pub fn parse_logical_or<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    parse_left_assoc(tokens, &[BinaryOperator::Or], parse_logical_and)
}

/// Parses logical AND expressions.
///
/// The rule is: `logical_and := equality ("&&" equality)*`
pub fn parse_logical_and<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    parse_left_assoc(tokens, &[BinaryOperator::And], parse_equality)
}

/// Parses equality expressions.
///
/// The rule is: `equality := comparison (("==" | "!=") comparison)*`
pub fn parse_equality<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    parse_left_assoc(tokens,
                     &[BinaryOperator::Equal, BinaryOperator::NotEqual],
                     parse_comparison)
}

/// Parses relational comparisons.
///
/// The rule is: `comparison := additive ((">" | ">=" | "<" | "<=") additive)*`
///
/// Note that `<` directly followed by a letter is lexed as a markup span, so
/// `a <b` is not a comparison. Write `a < b`.
pub fn parse_comparison<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    parse_left_assoc(tokens,
                     &[BinaryOperator::Greater,
                       BinaryOperator::GreaterEqual,
                       BinaryOperator::Less,
                       BinaryOperator::LessEqual],
                     parse_additive)
}

/// Parses addition and subtraction expressions.
///
/// Handles left-associative binary operators: `+` and `-`.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
///
/// # Parameters
/// - `tokens`: Token stream with line information.
///
/// # Returns
/// An `Expr::BinaryOp` tree representing the parsed expression.
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    parse_left_assoc(tokens,
                     &[BinaryOperator::Add, BinaryOperator::Sub],
                     parse_multiplicative)
}

/// Parses multiplication-level expressions.
///
/// The rule is: `multiplicative := unary (("*" | "/") unary)*`
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    parse_left_assoc(tokens,
                     &[BinaryOperator::Mul, BinaryOperator::Div],
                     parse_unary)
}

/// Maps a token to its corresponding binary operator.
///
/// Returns `Some(BinaryOperator)` when the token represents an infix
/// operator, and `None` for all other tokens. Assignment (`=`) is handled by
/// [`parse_assignment`] and is not returned here.
///
/// # Example
/// ```
/// use nixi::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::Plus), Some(BinaryOperator::Add));
/// assert_eq!(token_to_binary_operator(&Token::Equals), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::EqualEqual => Some(BinaryOperator::Equal),
        Token::BangEqual => Some(BinaryOperator::NotEqual),
        Token::Less => Some(BinaryOperator::Less),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        Token::AndAnd => Some(BinaryOperator::And),
        Token::OrOr => Some(BinaryOperator::Or),
        _ => None,
    }
}
