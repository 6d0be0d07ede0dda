use std::{collections::HashMap, io::Write, rc::Rc};

use log::debug;

use crate::{
    ast::{Expr, Program},
    error::RuntimeError,
    interpreter::{
        evaluator::function::core::is_builtin,
        value::{
            core::{Record, Value},
            environment::Environment,
            function::{Closure, Function},
        },
    },
    presenter::{HtmlRenderer, Presenter},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Stores the runtime evaluation context.
///
/// This struct holds the interpreter state that outlives a single
/// expression: names assigned at top level, declared components, the
/// presentation collaborator and the stream `echo` writes to.
///
/// ## Usage
///
/// `Context` is created once and reused for every program or REPL line, so
/// state carries over between calls to [`Context::eval_program`].
///
/// ```
/// use nixi::interpreter::{
///     evaluator::core::Context, lexer::tokenize, parser::statement::parse_program,
///     value::core::Value,
/// };
///
/// let mut ctx = Context::new();
/// let first = parse_program(&tokenize("x = 5").unwrap()).unwrap();
/// let second = parse_program(&tokenize("x * 2").unwrap()).unwrap();
///
/// ctx.eval_program(&first).unwrap();
/// assert_eq!(ctx.eval_program(&second).unwrap(), Value::Number(10.0));
/// ```
pub struct Context {
    /// Names bound by top-level assignment (`x = 5`).
    pub globals:    HashMap<String, Value>,
    /// Declared components, by name.
    pub components: HashMap<String, Value>,
    presenter:      Box<dyn Presenter>,
    output:         Box<dyn Write>,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Creates a context with the default [`HtmlRenderer`] that echoes to
    /// standard output.
    #[must_use]
    pub fn new() -> Self {
        Self::with_presenter(Box::new(HtmlRenderer::default()))
    }

    /// Creates a context that reports to the given presenter.
    #[must_use]
    pub fn with_presenter(presenter: Box<dyn Presenter>) -> Self {
        Self { globals: HashMap::new(),
               components: HashMap::new(),
               presenter,
               output: Box::new(std::io::stdout()) }
    }

    /// Redirects the output of `echo`.
    #[must_use]
    pub fn with_output(mut self, output: Box<dyn Write>) -> Self {
        self.output = output;
        self
    }

    /// The presentation collaborator.
    pub fn presenter(&mut self) -> &mut dyn Presenter {
        self.presenter.as_mut()
    }

    /// The stream `echo` writes to.
    pub fn output(&mut self) -> &mut dyn Write {
        self.output.as_mut()
    }

    /// Evaluates every statement of a program in order.
    ///
    /// # Returns
    /// The value of the last statement, or `null` for an empty program.
    pub fn eval_program(&mut self, program: &Program) -> EvalResult<Value> {
        let root = Environment::default();
        let mut result = Value::Null;
        for statement in &program.statements {
            result = self.eval(statement, &root)?;
        }
        debug!("evaluated {} statement(s)", program.statements.len());
        Ok(result)
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation.
    /// The evaluator dispatches on the expression variant; every variant
    /// yields a value (statement-like forms yield `null`).
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    /// - `env`: The lexical environment in effect.
    pub fn eval(&mut self, expr: &Expr, env: &Environment) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, line } => Value::from_literal(value, *line),
            Expr::Identifier { name, line } => self.lookup(name, env, *line),
            Expr::BinaryOp { left,
                             op,
                             right,
                             line, } => self.eval_binary_op(left, *op, right, env, *line),
            Expr::UnaryOp { op, expr, line } => self.eval_unary_op(*op, expr, env, *line),
            Expr::Call { callee,
                         arguments,
                         line, } => self.eval_call(callee, arguments, env, *line),
            Expr::Lambda { params, body, .. } => {
                Ok(Value::from(Function::Closure(Closure { name:   None,
                                                           params: params.clone(),
                                                           body:   Rc::clone(body),
                                                           env:    env.clone(), })))
            },
            Expr::Let { bindings, body, .. } => {
                let mut scope = env.clone();
                for binding in bindings {
                    let value = self.eval(&binding.value, &scope)?;
                    scope = scope.with_binding(binding.name.clone(), value);
                }
                self.eval(body, &scope)
            },
            Expr::Record { entries, .. } => {
                let mut record = Record::new();
                for entry in entries {
                    let value = self.eval(&entry.value, env)?;
                    record.insert(entry.key.clone(), value);
                }
                Ok(Value::from(record))
            },
            Expr::Array { elements, .. } => {
                let items = elements.iter()
                                    .map(|element| self.eval(element, env))
                                    .collect::<EvalResult<Vec<_>>>()?;
                Ok(Value::from(items))
            },
            Expr::PropertyAccess { object,
                                   property,
                                   line, } => match self.eval(object, env)? {
                Value::Record(record) => Ok(record.get(property).cloned().unwrap_or(Value::Null)),
                other => Err(RuntimeError::type_error(format!("cannot read property '{property}' of {}",
                                                              other.kind_name()),
                                                      *line)),
            },
            Expr::Conditional { condition,
                                then_branch,
                                else_branch,
                                .. } => {
                if self.eval(condition, env)?.is_truthy() {
                    self.eval(then_branch, env)
                } else {
                    self.eval(else_branch, env)
                }
            },
            Expr::Component { name, params, body, .. } => {
                let component = Function::Closure(Closure { name:   Some(name.clone()),
                                                            params: params.clone(),
                                                            body:   Rc::clone(body),
                                                            env:    env.clone(), });
                self.components.insert(name.clone(), Value::from(component));
                debug!("declared component '{name}'");
                Ok(Value::Null)
            },
            Expr::Instantiate { component,
                                props,
                                line, } => self.eval_instantiate(component, props, env, *line),
            Expr::StyleDefinition { selector,
                                    properties,
                                    .. } => {
                self.presenter.add_style(selector, properties);
                Ok(Value::Null)
            },
            Expr::Markup { tag, .. } => self.eval_markup(tag, env),
            Expr::MarkupComment { text, .. } => Ok(Value::from(text.as_str())),
            Expr::StyleRule { rule, .. } => {
                self.presenter.add_css(&rule.to_string());
                Ok(Value::Null)
            },
            Expr::StyleSheet { rules, .. } => {
                for rule in rules {
                    self.presenter.add_css(&rule.to_string());
                }
                Ok(Value::Null)
            },
            Expr::RawCode { code, .. } => Ok(Value::from(code.as_str())),
        }
    }

    /// Resolves a name.
    ///
    /// Resolution order is fixed: built-in functions, then declared
    /// components, then the lexical environment, then top-level assignments.
    ///
    /// # Errors
    /// `UnknownVariable` if the name is bound nowhere.
    pub fn lookup(&self, name: &str, env: &Environment, line: usize) -> EvalResult<Value> {
        if let Some(builtin) = is_builtin(name) {
            return Ok(Value::from(Function::Builtin(builtin)));
        }
        if let Some(component) = self.components.get(name) {
            return Ok(component.clone());
        }
        env.lookup(name)
           .or_else(|| self.globals.get(name))
           .cloned()
           .ok_or_else(|| RuntimeError::UnknownVariable { name: name.to_string(),
                                                          line })
    }
}
