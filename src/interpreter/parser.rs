/// Entry points shared by every level of the grammar.
///
/// Defines the parse result type, the expression entry point and the
/// keyword-introduced expressions (`if`, `let`).
pub mod core;

/// Top-level statements.
///
/// Builds the program from the token sequence and handles statement-only
/// forms: component and style definitions, and `html`/`css`/`js` documents.
pub mod statement;

/// Binary operators, from assignment down to multiplication.
pub mod binary;

/// Unary operators, postfix forms (calls, property access, instantiation) and
/// primary expressions.
pub mod unary;

/// Markup elements re-derived from raw tag spans.
pub mod markup;

/// Style declarations and sheets re-derived from raw style spans.
pub mod style;

/// Small helpers shared by the parser modules.
pub mod utils;
