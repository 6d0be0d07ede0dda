use std::rc::Rc;

use crate::interpreter::value::core::Value;

/// One binding in a chain of scopes.
#[derive(Debug)]
struct Frame {
    name:   String,
    value:  Value,
    parent: Option<Rc<Frame>>,
}

/// An immutable chain of name bindings.
///
/// Extending an environment never changes it; [`Environment::with_binding`]
/// returns a new chain that shares the old one. Closures therefore keep
/// seeing exactly the bindings that existed when they were created, and
/// sequential let bindings see only the bindings listed before them.
///
/// # Example
/// ```
/// use nixi::interpreter::value::{core::Value, environment::Environment};
///
/// let outer = Environment::default().with_binding("x", Value::Number(1.0));
/// let inner = outer.with_binding("x", Value::Number(2.0));
///
/// assert_eq!(outer.lookup("x"), Some(&Value::Number(1.0)));
/// assert_eq!(inner.lookup("x"), Some(&Value::Number(2.0)));
/// assert_eq!(inner.lookup("y"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Environment {
    head: Option<Rc<Frame>>,
}

impl Environment {
    /// Returns a new environment with `name` bound in front of `self`.
    #[must_use]
    pub fn with_binding(&self, name: impl Into<String>, value: Value) -> Self {
        Self { head: Some(Rc::new(Frame { name: name.into(),
                                          value,
                                          parent: self.head.clone() })) }
    }

    /// Finds the innermost binding of `name`.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        let mut frame = self.head.as_deref();
        while let Some(current) = frame {
            if current.name == name {
                return Some(&current.value);
            }
            frame = current.parent.as_deref();
        }
        None
    }
}
