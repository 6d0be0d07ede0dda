use crate::{
    ast::{BinaryOperator, Expr},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::{core::Value, environment::Environment},
    },
};

impl Context {
    /// Evaluates a binary expression node.
    ///
    /// Assignment stores the evaluated right side under the target name at
    /// top level and yields it. Every other operator evaluates both operands,
    /// left first, and hands them to [`Context::eval_binary`]. `&&` and `||`
    /// are no exception: both sides are always evaluated.
    ///
    /// # Parameters
    /// - `left`: Left operand expression.
    /// - `op`: The operator.
    /// - `right`: Right operand expression.
    /// - `env`: The lexical environment.
    /// - `line`: Line number for error reporting.
    pub(crate) fn eval_binary_op(&mut self,
                                 left: &Expr,
                                 op: BinaryOperator,
                                 right: &Expr,
                                 env: &Environment,
                                 line: usize)
                                 -> EvalResult<Value> {
        if op == BinaryOperator::Assign {
            let Expr::Identifier { name, .. } = left else {
                return Err(RuntimeError::InvalidAssignmentTarget { line });
            };
            let value = self.eval(right, env)?;
            self.globals.insert(name.clone(), value.clone());
            return Ok(value);
        }

        let left = self.eval(left, env)?;
        let right = self.eval(right, env)?;
        Self::eval_binary(op, &left, &right, line)
    }

    /// Evaluates a binary operation between two values.
    ///
    /// Arithmetic operators go to `eval_arithmetic`, equality and ordering to
    /// `eval_comparison`, and `&&`/`||` to `eval_logic`.
    ///
    /// # Example
    /// ```
    /// use nixi::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let result = Context::eval_binary(BinaryOperator::Add,
    ///                                   &Value::from("a"),
    ///                                   &Value::Number(1.0),
    ///                                   1);
    /// assert_eq!(result.unwrap(), Value::from("a1"));
    /// ```
    pub fn eval_binary(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       line: usize)
                       -> EvalResult<Value> {
        use BinaryOperator::{
            Add, And, Assign, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mul, NotEqual,
            Or, Sub,
        };

        match op {
            Add | Sub | Mul | Div => Self::eval_arithmetic(op, left, right, line),
            Equal | NotEqual | Less | LessEqual | Greater | GreaterEqual => {
                Self::eval_comparison(op, left, right, line)
            },
            And | Or => Ok(Self::eval_logic(op, left, right)),
            Assign => Err(RuntimeError::InvalidAssignmentTarget { line }),
        }
    }
}
