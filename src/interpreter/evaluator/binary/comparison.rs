use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::{
            binary::arithmetic::invalid_operands,
            core::{Context, EvalResult},
        },
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a comparison of the form `Value <Operator> Value`.
    ///
    /// `==` and `!=` compare structurally and accept any kinds; values of
    /// different kinds are simply unequal. The ordering operators require two
    /// numbers.
    ///
    /// # Example
    /// ```
    /// use nixi::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let a = Value::Number(3.0);
    /// let b = Value::Number(5.0);
    ///
    /// let result = Context::eval_comparison(BinaryOperator::Less, &a, &b, 1);
    /// assert_eq!(result.unwrap(), Value::Bool(true));
    ///
    /// let mixed = Context::eval_comparison(BinaryOperator::Equal, &a, &Value::from("3"), 1);
    /// assert_eq!(mixed.unwrap(), Value::Bool(false));
    /// ```
    pub fn eval_comparison(op: BinaryOperator,
                           left: &Value,
                           right: &Value,
                           line: usize)
                           -> EvalResult<Value> {
        use BinaryOperator::{Equal, Greater, GreaterEqual, Less, LessEqual, NotEqual};

        if op == Equal {
            return Ok(Value::Bool(left == right));
        }
        if op == NotEqual {
            return Ok(Value::Bool(left != right));
        }

        let (Value::Number(a), Value::Number(b)) = (left, right) else {
            return Err(invalid_operands(op, left, right, line));
        };
        let result = match op {
            Less => a < b,
            LessEqual => a <= b,
            Greater => a > b,
            GreaterEqual => a >= b,
            _ => return Err(invalid_operands(op, left, right, line)),
        };
        Ok(Value::Bool(result))
    }
}
