/// Lexing errors.
///
/// Raised when the scanner meets a character that no token rule accepts.
/// Tokenization stops at the first such character.
pub mod lex_error;
/// Parsing errors.
///
/// Defines all error types that can occur while building the syntax tree:
/// unexpected tokens, unbalanced markup, malformed style rules and invalid
/// assignment targets. The parser never recovers; the first error wins.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation, including
/// operand type mismatches, unknown variables, bad calls and host I/O
/// failures surfaced by builtins.
pub mod runtime_error;

pub use lex_error::LexError;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Any error produced by one of the pipeline phases.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Tokenization failed.
    Lex(LexError),
    /// Parsing failed.
    Parse(ParseError),
    /// Evaluation or code generation failed.
    Runtime(RuntimeError),
}

impl From<LexError> for Error {
    fn from(e: LexError) -> Self {
        Self::Lex(e)
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<RuntimeError> for Error {
    fn from(e: RuntimeError) -> Self {
        Self::Runtime(e)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lex(e) => write!(f, "{e}"),
            Self::Parse(e) => write!(f, "{e}"),
            Self::Runtime(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {}

/// An [`Error`] annotated with the name of the source unit it came from.
///
/// Every public entry point of the crate returns this type so callers (the
/// CLI, an editor integration) can report where a failure originated.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceError {
    /// Name of the source unit, usually a file path or `<stdin>`.
    pub unit:  String,
    /// The underlying phase error.
    pub error: Error,
}

impl SourceError {
    /// Wraps `error` with the source-unit name `unit`.
    #[must_use]
    pub fn new(unit: &str, error: impl Into<Error>) -> Self {
        Self { unit:  unit.to_string(),
               error: error.into(), }
    }

    /// Returns `true` if the failure happened during evaluation or
    /// generation rather than while reading the program.
    #[must_use]
    pub const fn is_runtime(&self) -> bool {
        matches!(self.error, Error::Runtime(_))
    }
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.unit, self.error)
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
