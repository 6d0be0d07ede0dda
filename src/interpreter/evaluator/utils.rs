use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{core::EvalResult, function::core::BUILTIN_FUNCTIONS},
        value::core::Value,
    },
};

/// Checks whether a name is reserved and therefore cannot be bound by an
/// assignment, a let binding or a parameter.
///
/// Every built-in function name is reserved.
///
/// # Example
/// ```
/// use nixi::interpreter::evaluator::utils::is_reserved_identifier;
///
/// assert!(is_reserved_identifier("map"));
/// assert!(!is_reserved_identifier("my_function"));
/// ```
#[must_use]
pub fn is_reserved_identifier(name: &str) -> bool {
    BUILTIN_FUNCTIONS.contains(&name)
}

/// Borrows the argument at `index`, or `null` when fewer arguments were
/// supplied.
#[must_use]
pub fn arg(args: &[Value], index: usize) -> &Value {
    args.get(index).unwrap_or(&Value::Null)
}

/// Joins the native forms of `args` with `separator`.
///
/// ## Example
/// ```
/// use nixi::interpreter::{evaluator::utils::join_native, value::core::Value};
///
/// let args = [Value::from("total:"), Value::Number(3.0)];
/// assert_eq!(join_native(&args, " "), "total: 3");
/// ```
#[must_use]
pub fn join_native(args: &[Value], separator: &str) -> String {
    args.iter()
        .map(Value::to_native_string)
        .collect::<Vec<_>>()
        .join(separator)
}

/// Wraps a host I/O failure as a runtime error, prefixed with the operation
/// that failed.
pub fn io_error(operation: &str, error: &std::io::Error, line: usize) -> RuntimeError {
    RuntimeError::Io { details: format!("{operation} failed: {error}"),
                       line }
}

/// Requires a string argument, naming the function in the error.
pub fn expect_str<'a>(args: &'a [Value],
                      index: usize,
                      function: &str,
                      line: usize)
                      -> EvalResult<&'a str> {
    arg(args, index).as_str(function, line)
}
