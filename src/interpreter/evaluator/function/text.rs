use crate::interpreter::{
    evaluator::{
        core::{Context, EvalResult},
        utils::{io_error, join_native},
    },
    value::core::Value,
};

/// Writes the native forms of all arguments, separated by spaces, followed
/// by a newline, to the context's output. Returns `null`.
///
/// # Example
/// ```
/// use nixi::interpreter::{
///     evaluator::{core::Context, function::text::echo},
///     value::core::Value,
/// };
///
/// let mut ctx = Context::new().with_output(Box::new(std::io::sink()));
/// let result = echo(&mut ctx, &[Value::from("hello"), Value::Number(2.0)], 1).unwrap();
/// assert_eq!(result, Value::Null);
/// ```
pub fn echo(ctx: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    let message = join_native(args, " ");
    writeln!(ctx.output(), "{message}").map_err(|e| io_error("echo", &e, line))?;
    Ok(Value::Null)
}

/// Concatenates the native forms of two values.
///
/// # Example
/// ```
/// use nixi::interpreter::{
///     evaluator::{core::Context, function::text::concat},
///     value::core::Value,
/// };
///
/// let mut ctx = Context::new();
/// let joined = concat(&mut ctx, &[Value::from("n="), Value::Number(4.0)], 1).unwrap();
/// assert_eq!(joined, Value::from("n=4"));
/// ```
pub fn concat(_: &mut Context, args: &[Value], _: usize) -> EvalResult<Value> {
    Ok(Value::Str(join_native(args, "")))
}

/// Converts a value to its native string form.
pub fn to_string(_: &mut Context, args: &[Value], _: usize) -> EvalResult<Value> {
    Ok(Value::Str(args[0].to_native_string()))
}
