#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while parsing a token stream.
pub enum ParseError {
    /// Found a token the grammar did not expect at this position.
    UnexpectedToken {
        /// What the parser was looking for.
        expected: String,
        /// The token encountered.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Reached the end of input while a construct was still open.
    UnexpectedEndOfInput {
        /// What the parser was looking for.
        expected: String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// The left side of `=` is not a bare identifier.
    InvalidAssignmentTarget {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to bind a name that belongs to a built-in function.
    IdentifierReserved {
        /// The reserved identifier name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A markup span whose tag name could not be read.
    InvalidMarkup {
        /// The raw span text.
        text: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A style block that is neither a declaration list nor a rule list.
    InvalidStyleRule {
        /// The raw span text.
        text: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A numeric literal that cannot be represented exactly.
    LiteralTooLarge {
        /// The source line where the error occurred.
        line: usize,
    },
}

impl ParseError {
    /// Gets the line number the error refers to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnexpectedToken { line, .. }
            | Self::UnexpectedEndOfInput { line, .. }
            | Self::InvalidAssignmentTarget { line }
            | Self::IdentifierReserved { line, .. }
            | Self::InvalidMarkup { line, .. }
            | Self::InvalidStyleRule { line, .. }
            | Self::LiteralTooLarge { line } => *line,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { expected,
                                    found,
                                    line, } => {
                write!(f, "Error on line {line}: Expected {expected}, got {found}.")
            },
            Self::UnexpectedEndOfInput { expected, line } => {
                write!(f, "Error on line {line}: Expected {expected}, got end of input.")
            },
            Self::InvalidAssignmentTarget { line } => {
                write!(f, "Error on line {line}: Invalid assignment target.")
            },
            Self::IdentifierReserved { name, line } => write!(f,
                                                              "Error on line {line}: Identifier '{name}' is a built-in and cannot be rebound."),
            Self::InvalidMarkup { text, line } => {
                write!(f, "Error on line {line}: Invalid markup tag: {text}")
            },
            Self::InvalidStyleRule { text, line } => {
                write!(f, "Error on line {line}: Invalid style rule: {text}")
            },
            Self::LiteralTooLarge { line } => {
                write!(f, "Error on line {line}: Literal is too large.")
            },
        }
    }
}

impl std::error::Error for ParseError {}
