use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates `+`, `-`, `*` and `/`.
    ///
    /// `+` adds two numbers, and concatenates the native text of both operands
    /// as soon as either one is a string. The other operators accept numbers
    /// only. Division follows IEEE rules, so `1 / 0` is `Infinity`.
    ///
    /// # Errors
    /// A `TypeError` naming the operator and both operand kinds.
    ///
    /// # Example
    /// ```
    /// use nixi::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let sum = Context::eval_arithmetic(BinaryOperator::Add,
    ///                                    &Value::Number(1.0),
    ///                                    &Value::from("a"),
    ///                                    1);
    /// assert_eq!(sum.unwrap(), Value::from("1a"));
    ///
    /// let difference = Context::eval_arithmetic(BinaryOperator::Sub,
    ///                                           &Value::Number(1.0),
    ///                                           &Value::from("a"),
    ///                                           1);
    /// assert!(difference.is_err());
    /// ```
    pub fn eval_arithmetic(op: BinaryOperator,
                           left: &Value,
                           right: &Value,
                           line: usize)
                           -> EvalResult<Value> {
        match (op, left, right) {
            (BinaryOperator::Add, Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
            (BinaryOperator::Add, Value::Str(_), _) | (BinaryOperator::Add, _, Value::Str(_)) => {
                let mut text = left.to_native_string();
                text.push_str(&right.to_native_string());
                Ok(Value::Str(text))
            },
            (BinaryOperator::Sub, Value::Number(a), Value::Number(b)) => Ok(Value::Number(a - b)),
            (BinaryOperator::Mul, Value::Number(a), Value::Number(b)) => Ok(Value::Number(a * b)),
            (BinaryOperator::Div, Value::Number(a), Value::Number(b)) => Ok(Value::Number(a / b)),
            _ => Err(invalid_operands(op, left, right, line)),
        }
    }
}

/// The error raised when an operator does not accept its operand kinds.
pub(crate) fn invalid_operands(op: BinaryOperator,
                               left: &Value,
                               right: &Value,
                               line: usize)
                               -> RuntimeError {
    RuntimeError::type_error(format!("invalid operands for {op}: {} and {}",
                                     left.kind_name(),
                                     right.kind_name()),
                             line)
}
