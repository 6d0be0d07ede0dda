/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator traverses the AST, evaluates expressions and statements,
/// calls closures and built-ins, and reports styles and markup to the
/// presentation collaborator. It is the core execution engine of the
/// interpreter.
///
/// # Responsibilities
/// - Evaluates AST nodes, performing all supported operations.
/// - Handles lexical scoping, closures, components and top-level assignment.
/// - Reports runtime errors such as operand type mismatches or bad calls.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (tokenizer) reads the raw source text and produces a stream of
/// tokens, each corresponding to meaningful language elements such as numbers,
/// identifiers, operators, delimiters, and keywords. Markup, style and script
/// spans are captured as raw tokens. This is the first stage of
/// interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with type and source
///   location.
/// - Handles numeric and string literals, identifiers, operators and raw
///   spans.
/// - Reports lexical errors for invalid input.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and constructs
/// an AST that represents the syntactic structure of expressions and
/// statements. This enables later phases to analyze and execute user code.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (expressions, statements).
/// - Validates correct grammar and syntax, reporting errors with location info.
/// - Supports operators, juxtaposed calls, lambdas, records, markup and
///   style forms.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares the value types used during interpretation: null,
/// booleans, numbers, strings, arrays, records and functions, together with
/// the environments closures capture.
///
/// # Responsibilities
/// - Defines the `Value` enum and all supported value variants.
/// - Implements truthiness, equality and the textual forms of values.
/// - Provides the persistent lexical environment.
pub mod value;
