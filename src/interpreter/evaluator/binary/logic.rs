use crate::{
    ast::BinaryOperator,
    interpreter::{evaluator::core::Context, value::core::Value},
};

impl Context {
    /// Evaluates a logical operation on the truthiness of two values.
    ///
    /// Both operands have already been evaluated; there is no short circuit.
    /// The result is always a boolean.
    ///
    /// # Example
    /// ```
    /// use nixi::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let result = Context::eval_logic(BinaryOperator::Or, &Value::Number(0.0), &Value::from("x"));
    /// assert_eq!(result, Value::Bool(true));
    /// ```
    #[must_use]
    pub fn eval_logic(op: BinaryOperator, left: &Value, right: &Value) -> Value {
        match op {
            BinaryOperator::And => Value::Bool(left.is_truthy() && right.is_truthy()),
            _ => Value::Bool(left.is_truthy() || right.is_truthy()),
        }
    }
}
