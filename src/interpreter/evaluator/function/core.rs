use log::trace;

use crate::{
    ast::{Expr, ParamSpec},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            function::{arithmetic, collection, element, presentation, system, text},
        },
        value::{
            core::Value,
            environment::Environment,
            function::{Closure, Function},
        },
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin receives the evaluation context, a slice of evaluated argument
/// values and the line number. It returns a value wrapped in `EvalResult`.
type BuiltinFn = fn(&mut Context, &[Value], usize) -> EvalResult<Value>;

/// Specifies the allowed number of arguments for a builtin.
///
/// - `Exact(n)` means the builtin must receive exactly `n` arguments.
/// - `OneOf(slice)` means the builtin accepts any arity listed in `slice`.
/// - `AtLeast(n)` means the builtin is variadic with `n` required arguments.
#[derive(Clone, Copy)]
enum Arity {
    Exact(usize),
    OneOf(&'static [usize]),
    AtLeast(usize),
}

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - an arity specification,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BuiltinDef` (internal metadata),
/// - `BUILTIN_TABLE` (static table for lookup),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:  &'static str,
            arity: Arity,
            func:  BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        /// Names of every built-in function, in table order.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "add"        => { arity: Arity::Exact(2), func: arithmetic::add },
    "subtract"   => { arity: Arity::Exact(2), func: arithmetic::subtract },
    "multiply"   => { arity: Arity::Exact(2), func: arithmetic::multiply },
    "divide"     => { arity: Arity::Exact(2), func: arithmetic::divide },
    "echo"       => { arity: Arity::AtLeast(0), func: text::echo },
    "concat"     => { arity: Arity::Exact(2), func: text::concat },
    "toString"   => { arity: Arity::Exact(1), func: text::to_string },
    "map"        => { arity: Arity::Exact(2), func: collection::map },
    "length"     => { arity: Arity::Exact(1), func: collection::length },
    "ls"         => { arity: Arity::OneOf(&[0, 1]), func: system::ls },
    "cd"         => { arity: Arity::Exact(1), func: system::cd },
    "pwd"        => { arity: Arity::Exact(0), func: system::pwd },
    "div"        => { arity: Arity::OneOf(&[0, 1]), func: |_, args, _| Ok(element::build("div", args)) },
    "span"       => { arity: Arity::OneOf(&[0, 1]), func: |_, args, _| Ok(element::build("span", args)) },
    "button"     => { arity: Arity::OneOf(&[0, 1]), func: |_, args, _| Ok(element::build("button", args)) },
    "input"      => { arity: Arity::OneOf(&[0, 1]), func: |_, args, _| Ok(element::build("input", args)) },
    "h1"         => { arity: Arity::OneOf(&[0, 1]), func: |_, args, _| Ok(element::build("h1", args)) },
    "h2"         => { arity: Arity::OneOf(&[0, 1]), func: |_, args, _| Ok(element::build("h2", args)) },
    "h3"         => { arity: Arity::OneOf(&[0, 1]), func: |_, args, _| Ok(element::build("h3", args)) },
    "p"          => { arity: Arity::OneOf(&[0, 1]), func: |_, args, _| Ok(element::build("p", args)) },
    "a"          => { arity: Arity::OneOf(&[0, 1]), func: |_, args, _| Ok(element::build("a", args)) },
    "renderHTML" => { arity: Arity::Exact(2), func: presentation::render_html },
    "saveHTML"   => { arity: Arity::Exact(3), func: presentation::save_html },
    "addStyle"   => { arity: Arity::Exact(2), func: presentation::add_style },
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    ///
    /// Returns `true` if the count is permitted, `false` otherwise.
    fn check(&self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == *m,
            Self::OneOf(arr) => arr.contains(&n),
            Self::AtLeast(m) => n >= *m,
        }
    }

    /// Describes the constraint for error messages, e.g. `2` or `0 or 1`.
    fn describe(&self) -> String {
        match self {
            Self::Exact(m) => m.to_string(),
            Self::OneOf(arr) => arr.iter()
                                   .map(ToString::to_string)
                                   .collect::<Vec<_>>()
                                   .join(" or "),
            Self::AtLeast(m) => format!("at least {m}"),
        }
    }
}

/// Looks up a built-in by name.
///
/// # Returns
/// The table's own `'static` copy of the name, or `None` if `name` is not a
/// built-in.
///
/// # Example
/// ```
/// use nixi::interpreter::evaluator::function::core::is_builtin;
///
/// assert_eq!(is_builtin("map"), Some("map"));
/// assert_eq!(is_builtin("Card"), None);
/// ```
#[must_use]
pub fn is_builtin(name: &str) -> Option<&'static str> {
    BUILTIN_TABLE.iter().find(|b| b.name == name).map(|b| b.name)
}

impl Context {
    /// Evaluates a call expression.
    ///
    /// The callee is evaluated first, then the arguments from left to right,
    /// and the result is handed to [`Context::call_function`].
    pub(crate) fn eval_call(&mut self,
                            callee: &Expr,
                            arguments: &[Expr],
                            env: &Environment,
                            line: usize)
                            -> EvalResult<Value> {
        let function = self.eval(callee, env)?;
        let args = arguments.iter()
                            .map(|argument| self.eval(argument, env))
                            .collect::<EvalResult<Vec<_>>>()?;
        self.call_function(&function, args, line)
    }

    /// Evaluates a component instantiation `Name { props }`.
    ///
    /// Instantiation is a call with the props record as the single argument.
    /// A component declared with positional parameters instead receives the
    /// props bound by name, provided every parameter name is a key of the
    /// record.
    pub(crate) fn eval_instantiate(&mut self,
                                   component: &Expr,
                                   props: &Expr,
                                   env: &Environment,
                                   line: usize)
                                   -> EvalResult<Value> {
        let function = self.eval(component, env)?;
        let props = self.eval(props, env)?;

        if let (Value::Function(callable), Value::Record(record)) = (&function, &props)
           && let Function::Closure(Closure { params: ParamSpec::Positional(names),
                                              .. }) = callable.as_ref()
           && !names.is_empty()
           && names.iter().all(|name| record.contains_key(name))
        {
            let args = names.iter()
                            .map(|name| record.get(name).cloned().unwrap_or(Value::Null))
                            .collect();
            return self.call_function(&function, args, line);
        }

        self.call_function(&function, vec![props], line)
    }

    /// Calls a function value with already evaluated arguments.
    ///
    /// # Errors
    /// - `NotCallable` if `function` is not a function value.
    /// - `ArgumentCountMismatch` if a built-in's arity is not satisfied, or if
    ///   a closure receives more arguments than it and its results accept.
    /// - Any error raised by the function body.
    ///
    /// # Example
    /// ```
    /// use nixi::interpreter::{
    ///     evaluator::core::Context, lexer::tokenize, parser::statement::parse_program,
    ///     value::core::Value,
    /// };
    ///
    /// let mut ctx = Context::new();
    /// let program = parse_program(&tokenize("x: y: x - y").unwrap()).unwrap();
    /// let minus = ctx.eval_program(&program).unwrap();
    ///
    /// let result = ctx.call_function(&minus, vec![Value::Number(5.0), Value::Number(3.0)], 1);
    /// assert_eq!(result.unwrap(), Value::Number(2.0));
    /// ```
    pub fn call_function(&mut self,
                         function: &Value,
                         args: Vec<Value>,
                         line: usize)
                         -> EvalResult<Value> {
        let Value::Function(callable) = function else {
            return Err(RuntimeError::NotCallable { kind: function.kind_name().to_string(),
                                                   line });
        };

        match callable.as_ref() {
            Function::Builtin(name) => self.call_builtin(name, &args, line),
            Function::Closure(closure) => self.call_closure(closure, args, line),
        }
    }

    /// Checks arity and runs a built-in.
    fn call_builtin(&mut self, name: &str, args: &[Value], line: usize) -> EvalResult<Value> {
        let Some(builtin) = BUILTIN_TABLE.iter().find(|b| b.name == name) else {
            return Err(RuntimeError::UnknownVariable { name: name.to_string(),
                                                       line });
        };
        if !builtin.arity.check(args.len()) {
            return Err(RuntimeError::ArgumentCountMismatch { name: name.to_string(),
                                                             expected: builtin.arity.describe(),
                                                             found: args.len(),
                                                             line });
        }
        trace!("calling builtin '{name}' with {} argument(s)", args.len());
        (builtin.func)(self, args, line)
    }

    /// Executes a closure.
    ///
    /// Parameters are bound in a fresh frame on top of the captured
    /// environment and the body is evaluated there.
    ///
    /// Positional parameters without a matching argument are bound to
    /// `null`. Surplus arguments are passed on to the function the body
    /// returns, which is how curried lambdas (`x: y: ...`) accept several
    /// arguments in one call.
    ///
    /// Named parameters are looked up in the single record argument; missing
    /// keys are bound to `null`.
    fn call_closure(&mut self,
                    closure: &Closure,
                    mut args: Vec<Value>,
                    line: usize)
                    -> EvalResult<Value> {
        let name = closure.name.as_deref().unwrap_or("<lambda>");
        let mut scope = closure.env.clone();

        match &closure.params {
            ParamSpec::Positional(names) => {
                let rest = args.split_off(names.len().min(args.len()));
                let mut supplied = args.into_iter();
                for param in names {
                    scope = scope.with_binding(param.clone(), supplied.next().unwrap_or(Value::Null));
                }

                let result = self.eval(&closure.body, &scope)?;
                if rest.is_empty() {
                    return Ok(result);
                }
                if matches!(result, Value::Function(_)) {
                    return self.call_function(&result, rest, line);
                }
                Err(RuntimeError::ArgumentCountMismatch { name: name.to_string(),
                                                          expected: names.len().to_string(),
                                                          found: names.len() + rest.len(),
                                                          line })
            },
            ParamSpec::Named(names) => {
                if args.len() != 1 {
                    return Err(RuntimeError::ArgumentCountMismatch { name: name.to_string(),
                                                                     expected: "1".to_string(),
                                                                     found: args.len(),
                                                                     line });
                }
                let Value::Record(record) = &args[0] else {
                    return Err(RuntimeError::type_error(format!("{name} expects a record argument, got {}",
                                                                args[0].kind_name()),
                                                        line));
                };
                for param in names {
                    scope = scope.with_binding(param.clone(),
                                               record.get(param).cloned().unwrap_or(Value::Null));
                }
                self.eval(&closure.body, &scope)
            },
        }
    }
}
