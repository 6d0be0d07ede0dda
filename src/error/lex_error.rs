/// An unrecognized character met during tokenization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    /// The offending source text (usually a single character).
    pub character: String,
    /// The source line where the error occurred.
    pub line:      usize,
    /// The source column where the error occurred.
    pub column:    usize,
}

impl LexError {
    /// Returns the human-readable message without location information.
    #[must_use]
    pub fn message(&self) -> String {
        format!("Unexpected character: {}", self.character)
    }
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f,
               "Error on line {}, column {}: {}.",
               self.line,
               self.column,
               self.message())
    }
}

impl std::error::Error for LexError {}
