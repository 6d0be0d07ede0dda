use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
    util::num::usize_to_f64_checked,
};

/// `map(f, list)`: applies `f` to every element of `list`, in order.
///
/// The list is checked before the function, so `map(1, 2)` reports the
/// missing array.
///
/// # Errors
/// - `TypeError` if `list` is not an array or `f` is not a function.
/// - Any error raised by `f`.
///
/// # Example
/// ```
/// use nixi::{interpreter::value::core::Value, evaluate_source};
///
/// let v = evaluate_source("map(x: x * 2, [1, 2, 3])", "<doc>").unwrap();
/// assert_eq!(v,
///            Value::from(vec![Value::Number(2.0), Value::Number(4.0), Value::Number(6.0)]));
/// ```
pub fn map(ctx: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    let Value::Array(items) = &args[1] else {
        return Err(RuntimeError::type_error(format!("map expects an array as second argument, got {}",
                                                    args[1].kind_name()),
                                            line));
    };
    if !matches!(args[0], Value::Function(_)) {
        return Err(RuntimeError::type_error(format!("map expects a function as first argument, got {}",
                                                    args[0].kind_name()),
                                            line));
    }

    let mapped = items.iter()
                      .map(|item| ctx.call_function(&args[0], vec![item.clone()], line))
                      .collect::<EvalResult<Vec<_>>>()?;
    Ok(Value::from(mapped))
}

/// `length(x)`: the number of elements of an array, or of characters of a
/// string.
///
/// # Example
/// ```
/// use nixi::interpreter::{
///     evaluator::{core::Context, function::collection::length},
///     value::core::Value,
/// };
///
/// let mut ctx = Context::new();
/// assert_eq!(length(&mut ctx, &[Value::from("héllo")], 1).unwrap(), Value::Number(5.0));
/// assert!(length(&mut ctx, &[Value::Number(5.0)], 1).is_err());
/// ```
pub fn length(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    let count = match &args[0] {
        Value::Array(items) => items.len(),
        Value::Str(text) => text.chars().count(),
        other => {
            return Err(RuntimeError::type_error(format!("length expects an array or a string, got {}",
                                                        other.kind_name()),
                                                line));
        },
    };
    Ok(Value::Number(usize_to_f64_checked(count, line)?))
}
