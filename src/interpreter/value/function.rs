use std::rc::Rc;

use crate::{
    ast::{Expr, ParamSpec},
    interpreter::value::environment::Environment,
};

/// A callable runtime value.
#[derive(Debug)]
pub enum Function {
    /// A lambda or component together with the environment it was created in.
    Closure(Closure),
    /// A built-in function, identified by its table name.
    Builtin(&'static str),
}

/// A user-defined function.
#[derive(Debug)]
pub struct Closure {
    /// The component name, or `None` for anonymous lambdas.
    pub name:   Option<String>,
    /// The declared parameters.
    pub params: ParamSpec,
    /// The body, shared with the syntax tree.
    pub body:   Rc<Expr>,
    /// The captured defining environment.
    pub env:    Environment,
}

impl Function {
    /// The name used in error messages: the component or built-in name, or
    /// `<lambda>`.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Closure(Closure { name: Some(name), .. }) => name,
            Self::Closure(_) => "<lambda>",
            Self::Builtin(name) => name,
        }
    }
}
