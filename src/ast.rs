use std::{fmt, rc::Rc};

/// Represents a literal value in the language.
///
/// `LiteralValue` covers every constant that can appear directly in source
/// code. Integers and floats stay distinct in the tree (they come from
/// different token kinds) but collapse into one number kind at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// An integer literal such as `42`.
    Integer(i64),
    /// A literal with a decimal point such as `3.5`.
    Float(f64),
    /// A string literal, or a run of markup text.
    Str(String),
    /// `true` or `false`.
    Bool(bool),
    /// `null`.
    Null,
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

/// Parameter list of a lambda or component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamSpec {
    /// `x y: ...` style parameters, bound by position.
    Positional(Vec<String>),
    /// `{ x, y }: ...` style parameters, bound by name from a record argument.
    /// Declaration order is kept for generated code.
    Named(Vec<String>),
}

impl ParamSpec {
    /// The declared parameter names in source order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        match self {
            Self::Positional(names) | Self::Named(names) => names,
        }
    }
}

/// One `name = expression` pair of a let-expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    /// The bound name.
    pub name:  String,
    /// The bound expression.
    pub value: Expr,
    /// Line number in the source code.
    pub line:  usize,
}

/// One `key: expression` entry of a record literal.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordEntry {
    /// The record key.
    pub key:   String,
    /// The value expression.
    pub value: Expr,
}

/// A single `property: value` pair of a style declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleProperty {
    /// Property name, e.g. `background-color`.
    pub name:  String,
    /// Property value, kept verbatim.
    pub value: String,
}

/// A style rule parsed from a raw style span: a selector and its ordered
/// declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssRule {
    /// The rule selector, e.g. `.card` or `body`.
    pub selector:   String,
    /// Declarations in source order.
    pub properties: Vec<StyleProperty>,
}

/// Value of a markup attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// `name="value"`.
    Text(String),
    /// A bare `name` attribute, equivalent to boolean true.
    Flag,
}

/// A markup attribute as written in the opening tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name.
    pub name:  String,
    /// Attribute value.
    pub value: AttrValue,
}

/// A markup element: `<name attrs>children</name>` or `<name attrs />`.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkupTag {
    /// The tag name.
    pub name:         String,
    /// Attributes in source order.
    pub attributes:   Vec<Attribute>,
    /// Child nodes between the opening and closing spans.
    pub children:     Vec<Expr>,
    /// Whether the element has no closing span (`/>` or a void element).
    pub self_closing: bool,
}

/// An abstract syntax tree (AST) node.
///
/// `Expr` is the closed set of node kinds the parser produces and both
/// backends consume. Top-level statements are ordinary nodes; statement-only
/// forms (component and style definitions) are variants too, so every
/// consumer matches exhaustively over one type.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value.
    Literal {
        /// The constant value.
        value: LiteralValue,
        /// Line number in the source code.
        line:  usize,
    },
    /// Reference to a name.
    Identifier {
        /// The referenced name.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// A binary operation, including assignment.
    BinaryOp {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// A prefix operation.
    UnaryOp {
        /// The operator.
        op:   UnaryOperator,
        /// The operand.
        expr: Box<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// Function call, either `f(a, b)` or juxtaposed `f a b`.
    Call {
        /// The expression producing the function.
        callee:    Box<Self>,
        /// Arguments in source order.
        arguments: Vec<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// Anonymous function.
    Lambda {
        /// The parameter list.
        params: ParamSpec,
        /// The body, shared with closures created from it.
        body:   Rc<Self>,
        /// Line number in the source code.
        line:   usize,
    },
    /// `let a = 1; b = a in body`.
    Let {
        /// Bindings in source order.
        bindings: Vec<Binding>,
        /// The body evaluated after all bindings.
        body:     Box<Self>,
        /// Line number in the source code.
        line:     usize,
    },
    /// `{ key: value, ... }`.
    Record {
        /// Entries in source order.
        entries: Vec<RecordEntry>,
        /// Line number in the source code.
        line:    usize,
    },
    /// `[a, b, c]`.
    Array {
        /// Element expressions.
        elements: Vec<Self>,
        /// Line number in the source code.
        line:     usize,
    },
    /// `object.property`.
    PropertyAccess {
        /// The record expression.
        object:   Box<Self>,
        /// The property name.
        property: String,
        /// Line number in the source code.
        line:     usize,
    },
    /// `if (c) then a else b`.
    Conditional {
        /// The condition.
        condition:   Box<Self>,
        /// Branch taken when the condition is truthy.
        then_branch: Box<Self>,
        /// Branch taken otherwise.
        else_branch: Box<Self>,
        /// Line number in the source code.
        line:        usize,
    },
    /// `component Name = params : body`.
    Component {
        /// The component name.
        name:   String,
        /// The parameter list.
        params: ParamSpec,
        /// The body, shared with the component's closure.
        body:   Rc<Self>,
        /// Line number in the source code.
        line:   usize,
    },
    /// `Name { props }`.
    Instantiate {
        /// The component expression.
        component: Box<Self>,
        /// The props expression (a record literal).
        props:     Box<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// `style "selector" { prop: "value"; ... }`.
    StyleDefinition {
        /// The selector string.
        selector:   String,
        /// Declarations in source order.
        properties: Vec<StyleProperty>,
        /// Line number in the source code.
        line:       usize,
    },
    /// A markup element.
    Markup {
        /// The element.
        tag:  MarkupTag,
        /// Line number in the source code.
        line: usize,
    },
    /// `<!-- ... -->`, kept verbatim.
    MarkupComment {
        /// The raw comment text including delimiters.
        text: String,
        /// Line number in the source code.
        line: usize,
    },
    /// A single style rule from a raw style span.
    StyleRule {
        /// The rule.
        rule: CssRule,
        /// Line number in the source code.
        line: usize,
    },
    /// A whole style sheet: several rules from one or more style spans.
    StyleSheet {
        /// The rules in source order.
        rules: Vec<CssRule>,
        /// Line number in the source code.
        line:  usize,
    },
    /// An opaque block of embedded code.
    RawCode {
        /// The code payload.
        code: String,
        /// Line number in the source code.
        line: usize,
    },
}

impl Expr {
    /// Gets the line number from `self`.
    /// ## Example
    /// ```
    /// use nixi::ast::Expr;
    ///
    /// let expr = Expr::Identifier { name: "x".to_string(),
    ///                               line: 5, };
    ///
    /// assert_eq!(expr.line_number(), 5);
    /// ```
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Literal { line, .. }
            | Self::Identifier { line, .. }
            | Self::BinaryOp { line, .. }
            | Self::UnaryOp { line, .. }
            | Self::Call { line, .. }
            | Self::Lambda { line, .. }
            | Self::Let { line, .. }
            | Self::Record { line, .. }
            | Self::Array { line, .. }
            | Self::PropertyAccess { line, .. }
            | Self::Conditional { line, .. }
            | Self::Component { line, .. }
            | Self::Instantiate { line, .. }
            | Self::StyleDefinition { line, .. }
            | Self::Markup { line, .. }
            | Self::MarkupComment { line, .. }
            | Self::StyleRule { line, .. }
            | Self::StyleSheet { line, .. }
            | Self::RawCode { line, .. } => *line,
        }
    }

    /// Builds a string literal node.
    #[must_use]
    pub fn text(value: impl Into<String>, line: usize) -> Self {
        Self::Literal { value: LiteralValue::Str(value.into()),
                        line }
    }
}

/// A parsed source unit: top-level statements in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// The statements, executed strictly in this order.
    pub statements: Vec<Expr>,
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition or concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Less than (`<`)
    Less,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than (`>`)
    Greater,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Logical and (`&&`), both sides always evaluated
    And,
    /// Logical or (`||`), both sides always evaluated
    Or,
    /// Assignment to a bare identifier (`=`)
    Assign,
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`).
    Negate,
    /// Logical NOT (e.g. `!x`).
    Not,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use BinaryOperator::{
            Add, And, Assign, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mul, NotEqual,
            Or, Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Equal => "==",
            NotEqual => "!=",
            Less => "<",
            LessEqual => "<=",
            Greater => ">",
            GreaterEqual => ">=",
            And => "&&",
            Or => "||",
            Assign => "=",
        };
        write!(f, "{operator}")
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Negate => write!(f, "-"),
            Self::Not => write!(f, "!"),
        }
    }
}

impl fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {};", self.name, self.value)
    }
}

/// Serializes a rule back to style-sheet text, one declaration per line.
impl fmt::Display for CssRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {{", self.selector)?;
        for property in &self.properties {
            writeln!(f, "  {property}")?;
        }
        write!(f, "}}")
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            AttrValue::Text(value) => write!(f, "{}=\"{value}\"", self.name),
            AttrValue::Flag => write!(f, "{}", self.name),
        }
    }
}

impl MarkupTag {
    /// Renders the opening span, e.g. `<div class="card">`.
    #[must_use]
    pub fn open_tag(&self) -> String {
        let mut out = format!("<{}", self.name);
        for attribute in &self.attributes {
            out.push(' ');
            out.push_str(&attribute.to_string());
        }
        if self.self_closing {
            out.push_str(" />");
        } else {
            out.push('>');
        }
        out
    }

    /// Renders the closing span, or nothing for self-closing elements.
    #[must_use]
    pub fn close_tag(&self) -> String {
        if self.self_closing {
            String::new()
        } else {
            format!("</{}>", self.name)
        }
    }
}

/// Serializes a markup element back to source text. Text children are
/// written unquoted; other expressions are wrapped in parentheses.
impl fmt::Display for MarkupTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.open_tag())?;
        for child in &self.children {
            match child {
                Expr::Literal { value: LiteralValue::Str(text),
                                .. } => write!(f, "{text}")?,
                Expr::Markup { tag, .. } => write!(f, "{tag}")?,
                Expr::MarkupComment { text, .. } | Expr::RawCode { code: text, .. } => {
                    write!(f, "{text}")?;
                },
                other => write!(f, "({other})")?,
            }
        }
        write!(f, "{}", self.close_tag())
    }
}

fn write_params(f: &mut fmt::Formatter<'_>, params: &ParamSpec) -> fmt::Result {
    match params {
        ParamSpec::Positional(names) => write!(f, "{}", names.join(" ")),
        ParamSpec::Named(names) => write!(f, "{{ {} }}", names.join(", ")),
    }
}

fn write_string(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    write!(f, "\"")?;
    for c in s.chars() {
        match c {
            '"' => write!(f, "\\\"")?,
            '\\' => write!(f, "\\\\")?,
            '\n' => write!(f, "\\n")?,
            '\t' => write!(f, "\\t")?,
            '\r' => write!(f, "\\r")?,
            c => write!(f, "{c}")?,
        }
    }
    write!(f, "\"")
}

/// Serializes a node back to parseable source text.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal { value, .. } => match value {
                LiteralValue::Integer(n) => write!(f, "{n}"),
                LiteralValue::Float(x) if x.fract() == 0.0 && x.is_finite() => write!(f, "{x:.1}"),
                LiteralValue::Float(x) => write!(f, "{x}"),
                LiteralValue::Str(s) => write_string(f, s),
                LiteralValue::Bool(b) => write!(f, "{b}"),
                LiteralValue::Null => write!(f, "null"),
            },
            Self::Identifier { name, .. } => write!(f, "{name}"),
            Self::BinaryOp { left, op, right, .. } => write!(f, "({left} {op} {right})"),
            Self::UnaryOp { op, expr, .. } => write!(f, "{op}{expr}"),
            Self::Call { callee, arguments, .. } => {
                write!(f, "{callee}(")?;
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{argument}")?;
                }
                write!(f, ")")
            },
            Self::Lambda { params, body, .. } => {
                write!(f, "(")?;
                write_params(f, params)?;
                write!(f, ": {body})")
            },
            Self::Let { bindings, body, .. } => {
                write!(f, "let ")?;
                for binding in bindings {
                    write!(f, "{} = {}; ", binding.name, binding.value)?;
                }
                write!(f, "in {body}")
            },
            Self::Record { entries, .. } => {
                write!(f, "{{ ")?;
                for (i, entry) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", entry.key, entry.value)?;
                }
                write!(f, " }}")
            },
            Self::Array { elements, .. } => {
                write!(f, "[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{element}")?;
                }
                write!(f, "]")
            },
            Self::PropertyAccess { object, property, .. } => write!(f, "{object}.{property}"),
            Self::Conditional { condition,
                                then_branch,
                                else_branch,
                                .. } => {
                write!(f, "if ({condition}) then {then_branch} else {else_branch}")
            },
            Self::Component { name, params, body, .. } => {
                write!(f, "component {name} = ")?;
                write_params(f, params)?;
                write!(f, ": {body}")
            },
            Self::Instantiate { component, props, .. } => write!(f, "{component} {props}"),
            Self::StyleDefinition { selector,
                                    properties,
                                    .. } => {
                write!(f, "style ")?;
                write_string(f, selector)?;
                write!(f, " {{")?;
                for property in properties {
                    write!(f, " {}: ", property.name)?;
                    write_string(f, &property.value)?;
                    write!(f, ";")?;
                }
                write!(f, " }}")
            },
            Self::Markup { tag, .. } => write!(f, "{tag}"),
            Self::MarkupComment { text, .. } => write!(f, "{text}"),
            Self::StyleRule { rule, .. } => {
                write!(f, "{}{{", rule.selector)?;
                for property in &rule.properties {
                    write!(f, " {property}")?;
                }
                write!(f, " }}")
            },
            Self::StyleSheet { rules, .. } => {
                write!(f, "css{{")?;
                for rule in rules {
                    writeln!(f, "{rule}")?;
                }
                write!(f, "}}")
            },
            Self::RawCode { code, .. } => write!(f, "js <script>{code}</script>"),
        }
    }
}
