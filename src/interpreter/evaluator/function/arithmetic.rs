use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

/// `add(a, b)`, the function form of `a + b`.
///
/// Follows the operator exactly, including string concatenation when either
/// argument is a string.
///
/// # Example
/// ```
/// use nixi::interpreter::{
///     evaluator::{core::Context, function::arithmetic::add},
///     value::core::Value,
/// };
///
/// let mut ctx = Context::new();
/// let sum = add(&mut ctx, &[Value::Number(2.0), Value::Number(3.0)], 1).unwrap();
/// assert_eq!(sum, Value::Number(5.0));
/// ```
pub fn add(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    Context::eval_arithmetic(BinaryOperator::Add, &args[0], &args[1], line)
}

/// `subtract(a, b)`, the function form of `a - b`.
pub fn subtract(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    Context::eval_arithmetic(BinaryOperator::Sub, &args[0], &args[1], line)
}

/// `multiply(a, b)`, the function form of `a * b`.
pub fn multiply(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    Context::eval_arithmetic(BinaryOperator::Mul, &args[0], &args[1], line)
}

/// `divide(a, b)`, the function form of `a / b`. Division by zero yields an
/// infinity or `NaN`, never an error.
pub fn divide(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    Context::eval_arithmetic(BinaryOperator::Div, &args[0], &args[1], line)
}
