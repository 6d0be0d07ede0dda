use std::{
    fmt::{self, Write as _},
    rc::Rc,
};

use indexmap::IndexMap;

use crate::{
    ast::LiteralValue,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::function::Function},
    util::num::{format_number, i64_to_f64_checked},
};

/// An ordered record: keys keep their insertion order.
pub type Record = IndexMap<String, Value>;

/// Represents a runtime value in the interpreter.
///
/// This enum models every kind of value an expression can produce. Compound
/// values are reference counted, so copying a value never copies its
/// contents.
#[derive(Debug, Clone)]
pub enum Value {
    /// The absence of a value (`null`).
    Null,
    /// A boolean value (`true` or `false`).
    Bool(bool),
    /// A number. There is a single number kind; integer literals become
    /// integral numbers.
    Number(f64),
    /// A string.
    Str(String),
    /// An ordered list of values.
    Array(Rc<Vec<Self>>),
    /// An ordered key/value record.
    Record(Rc<Record>),
    /// A callable value: a closure or a built-in.
    Function(Rc<Function>),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::Array(Rc::new(v))
    }
}

impl From<Record> for Value {
    fn from(v: Record) -> Self {
        Self::Record(Rc::new(v))
    }
}

impl From<Function> for Value {
    fn from(v: Function) -> Self {
        Self::Function(Rc::new(v))
    }
}

/// Structural equality. Values of different kinds are never equal, numbers
/// follow IEEE comparison (`NaN != NaN`), and functions are equal only to
/// themselves (a built-in is itself under every lookup).
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Record(a), Self::Record(b)) => {
                a.len() == b.len() && a.iter().all(|(key, value)| b.get(key) == Some(value))
            },
            (Self::Function(a), Self::Function(b)) => {
                Rc::ptr_eq(a, b)
                || matches!((a.as_ref(), b.as_ref()),
                            (Function::Builtin(x), Function::Builtin(y)) if x == y)
            },
            _ => false,
        }
    }
}

impl Value {
    /// Converts a literal from the syntax tree into a value.
    ///
    /// # Errors
    /// `TypeError` if an integer literal cannot be represented exactly.
    ///
    /// # Example
    /// ```
    /// use nixi::{ast::LiteralValue, interpreter::value::core::Value};
    ///
    /// let v = Value::from_literal(&LiteralValue::Integer(5), 1).unwrap();
    /// assert_eq!(v, Value::Number(5.0));
    /// ```
    pub fn from_literal(literal: &LiteralValue, line: usize) -> EvalResult<Self> {
        Ok(match literal {
               LiteralValue::Integer(n) => {
                   Self::Number(i64_to_f64_checked(*n,
                                                   RuntimeError::type_error("integer literal is too large",
                                                                            line))?)
               },
               LiteralValue::Float(x) => Self::Number(*x),
               LiteralValue::Str(s) => Self::Str(s.clone()),
               LiteralValue::Bool(b) => Self::Bool(*b),
               LiteralValue::Null => Self::Null,
           })
    }

    /// Builds the structural value `{ type, props }` produced by the markup
    /// element built-ins.
    #[must_use]
    pub fn element(kind: &str, props: Self) -> Self {
        let mut record = Record::new();
        record.insert("type".to_string(), Self::from(kind));
        record.insert("props".to_string(), props);
        Self::from(record)
    }

    /// Returns the name of the value's kind, as used in error messages.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::Str(_) => "string",
            Self::Array(_) => "array",
            Self::Record(_) => "record",
            Self::Function(_) => "function",
        }
    }

    /// Converts the value to an `f64`, or returns an error if not numeric.
    ///
    /// # Parameters
    /// - `context`: What needed the number, used in the error message.
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Example
    /// ```
    /// use nixi::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Number(10.0).as_number("test", 1).unwrap(), 10.0);
    /// assert!(Value::from("10").as_number("test", 1).is_err());
    /// ```
    pub fn as_number(&self, context: &str, line: usize) -> EvalResult<f64> {
        match self {
            Self::Number(n) => Ok(*n),
            other => Err(RuntimeError::type_error(format!("{context} expects a number, got {}",
                                                          other.kind_name()),
                                                  line)),
        }
    }

    /// Borrows the string contents, or returns an error if not a string.
    pub fn as_str(&self, context: &str, line: usize) -> EvalResult<&str> {
        match self {
            Self::Str(s) => Ok(s),
            other => Err(RuntimeError::type_error(format!("{context} expects a string, got {}",
                                                          other.kind_name()),
                                                  line)),
        }
    }

    /// Native truthiness: `null`, `false`, `0`, `NaN` and `""` are falsy,
    /// every other value is truthy.
    ///
    /// # Example
    /// ```
    /// use nixi::interpreter::value::core::Value;
    ///
    /// assert!(!Value::Number(0.0).is_truthy());
    /// assert!(!Value::from("").is_truthy());
    /// assert!(Value::from(vec![]).is_truthy());
    /// ```
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Str(s) => !s.is_empty(),
            Self::Array(_) | Self::Record(_) | Self::Function(_) => true,
        }
    }

    /// The native textual form, used for string concatenation and markup
    /// children.
    ///
    /// Strings appear without quotes, numbers in host formatting, arrays as
    /// their elements joined by `,`, and `null` as `null`.
    ///
    /// # Example
    /// ```
    /// use nixi::interpreter::value::core::Value;
    ///
    /// let v = Value::from(vec![Value::Number(1.0), Value::from("a")]);
    /// assert_eq!(v.to_native_string(), "1,a");
    /// ```
    #[must_use]
    pub fn to_native_string(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => format_number(*n),
            Self::Str(s) => s.clone(),
            Self::Array(items) => items.iter()
                                       .map(Self::to_native_string)
                                       .collect::<Vec<_>>()
                                       .join(","),
            Self::Record(_) | Self::Function(_) => self.to_string(),
        }
    }
}

/// The display form printed by the command line: strings quoted, arrays as
/// `[a, b]`, records as `{ k = v }`, functions as `<function>`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{}", format_number(*n)),
            Self::Str(s) => write_quoted(f, s),
            Self::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            },
            Self::Record(record) => {
                if record.is_empty() {
                    return write!(f, "{{}}");
                }
                write!(f, "{{ ")?;
                for (i, (key, value)) in record.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key} = {value}")?;
                }
                write!(f, " }}")
            },
            Self::Function(_) => write!(f, "<function>"),
        }
    }
}

/// Writes a string the way `JSON.stringify` quotes it, which is how the
/// generated code prints strings.
fn write_quoted(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in text.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\u{8}' => f.write_str("\\b")?,
            '\u{c}' => f.write_str("\\f")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if u32::from(c) < 0x20 => write!(f, "\\u{:04x}", u32::from(c))?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}
