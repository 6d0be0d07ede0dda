#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during evaluation and generation.
pub enum RuntimeError {
    /// Tried to read a variable that is bound nowhere.
    UnknownVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// An operator or builtin received operands of the wrong kind.
    TypeError {
        /// Details about the type mismatch.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// The callee of a call is not a function value.
    NotCallable {
        /// The kind of value that was called.
        kind: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The wrong number of arguments was supplied to a function.
    ArgumentCountMismatch {
        /// The function name (or `<lambda>`).
        name:     String,
        /// Human-readable description of the accepted arity.
        expected: String,
        /// The number of arguments supplied.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// `=` applied to something other than a bare identifier.
    InvalidAssignmentTarget {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A host operation (filesystem, output) failed.
    Io {
        /// Details reported by the host.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
}

impl RuntimeError {
    /// Shorthand for building a [`RuntimeError::TypeError`].
    #[must_use]
    pub fn type_error(details: impl Into<String>, line: usize) -> Self {
        Self::TypeError { details: details.into(),
                          line }
    }

    /// Gets the line number the error refers to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnknownVariable { line, .. }
            | Self::TypeError { line, .. }
            | Self::NotCallable { line, .. }
            | Self::ArgumentCountMismatch { line, .. }
            | Self::InvalidAssignmentTarget { line }
            | Self::Io { line, .. } => *line,
        }
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownVariable { name, line } => {
                write!(f, "Error on line {line}: Unknown variable '{name}'.")
            },
            Self::TypeError { details, line } => {
                write!(f, "Error on line {line}: Type error: {details}.")
            },
            Self::NotCallable { kind, line } => {
                write!(f, "Error on line {line}: Value of kind {kind} is not callable.")
            },
            Self::ArgumentCountMismatch { name,
                                          expected,
                                          found,
                                          line, } => write!(f,
                                                            "Error on line {line}: '{name}' expects {expected} argument(s), got {found}."),
            Self::InvalidAssignmentTarget { line } => {
                write!(f, "Error on line {line}: Invalid assignment target.")
            },
            Self::Io { details, line } => write!(f, "Error on line {line}: {details}."),
        }
    }
}

impl std::error::Error for RuntimeError {}
