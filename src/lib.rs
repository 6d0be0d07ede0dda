//! # nixi
//!
//! nixi is a small functional language for building pages. Expressions in a
//! Nix-like syntax mix freely with embedded markup, style and script blocks.
//! Programs can be evaluated directly by a tree-walking evaluator or compiled
//! to JavaScript for a Node host; both backends share one set of semantics.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    codegen::core::{Compilation, GenerateOptions, Generator},
    error::SourceError,
    interpreter::{
        evaluator::core::Context,
        lexer::{self, Lexeme},
        parser::statement::parse_program,
        value::core::Value,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` enum and related types that represent the
/// syntactic structure of source code as a tree. The AST is built by the parser
/// and consumed by both the evaluator and the code generator.
///
/// # Responsibilities
/// - Defines node types for expressions, markup, style rules and raw code.
/// - Attaches line numbers to every node for error reporting.
/// - Serializes nodes back to source text.
pub mod ast;
/// Translates programs into JavaScript.
///
/// The generator walks the same syntax tree the evaluator executes and emits
/// code that reproduces the evaluator's behavior on a Node host, on top of a
/// small runtime prelude.
pub mod codegen;
/// Provides unified error types for lexing, parsing and evaluation.
///
/// This module defines all errors that can be raised while reading or running
/// code. Every error carries the line it refers to; [`error::SourceError`]
/// adds the name of the source unit.
///
/// # Responsibilities
/// - Defines error types for all failure modes (lexer, parser, evaluator).
/// - Attaches line numbers and detailed messages for context.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation and value
/// representations to provide a complete runtime for source code evaluation.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Provides entry points for parsing and evaluating user code.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// The presentation collaborator.
///
/// Receives styles and structural values from running programs and renders
/// them into HTML documents.
pub mod presenter;
/// General utilities for safe numeric conversion and formatting.
///
/// This module provides helpers that are used throughout the evaluator and
/// the code generator.
///
/// # Responsibilities
/// - Safely convert between integer types and `f64` without silent data loss.
/// - Format numbers identically in both backends.
pub mod util;

/// Tokenizes a source text.
///
/// # Errors
/// The first unrecognized character, as a [`SourceError`] naming `unit`.
///
/// # Examples
/// ```
/// use nixi::tokenize;
///
/// let tokens = tokenize("1 + 2", "<doc>").unwrap();
/// assert_eq!(tokens.len(), 4); // including the end marker
///
/// assert!(tokenize("1 @ 2", "<doc>").is_err());
/// ```
pub fn tokenize(source: &str, unit: &str) -> Result<Vec<Lexeme>, SourceError> {
    lexer::tokenize(source).map_err(|e| SourceError::new(unit, e))
}

/// Parses a token sequence produced by [`tokenize`].
///
/// # Errors
/// The first syntax error, as a [`SourceError`] naming `unit`.
pub fn parse(tokens: &[Lexeme], unit: &str) -> Result<ast::Program, SourceError> {
    parse_program(tokens).map_err(|e| SourceError::new(unit, e))
}

/// Tokenizes and parses a source text.
///
/// # Errors
/// The first lexical or syntax error.
///
/// # Examples
/// ```
/// use nixi::parse_source;
///
/// let program = parse_source("x = 1; x + 1", "<doc>").unwrap();
/// assert_eq!(program.statements.len(), 2);
/// ```
pub fn parse_source(source: &str, unit: &str) -> Result<ast::Program, SourceError> {
    parse(&tokenize(source, unit)?, unit)
}

/// Parses and evaluates a source text in an existing context.
///
/// State left by earlier calls on the same context (top-level assignments,
/// components, registered styles) stays visible, which is what the REPL
/// relies on.
///
/// # Errors
/// Returns an error if lexing, parsing or evaluation fails.
///
/// # Examples
/// ```
/// use nixi::{get_result, interpreter::{evaluator::core::Context, value::core::Value}};
///
/// let mut context = Context::new();
/// get_result(&mut context, "total = 2 + 2", "<repl>").unwrap();
/// let value = get_result(&mut context, "total * 10", "<repl>").unwrap();
/// assert_eq!(value, Value::Number(40.0));
///
/// // Unknown variable
/// assert!(get_result(&mut context, "y + 1", "<repl>").is_err());
/// ```
pub fn get_result(context: &mut Context, source: &str, unit: &str) -> Result<Value, SourceError> {
    let program = parse_source(source, unit)?;
    context.eval_program(&program)
           .map_err(|e| SourceError::new(unit, e))
}

/// Evaluates a source text in a fresh context.
///
/// # Errors
/// Returns an error if lexing, parsing or evaluation fails.
///
/// # Examples
/// ```
/// use nixi::{evaluate_source, interpreter::value::core::Value};
///
/// let value = evaluate_source("let x = 5; in x + 10", "<doc>").unwrap();
/// assert_eq!(value, Value::Number(15.0));
/// ```
pub fn evaluate_source(source: &str, unit: &str) -> Result<Value, SourceError> {
    get_result(&mut Context::new(), source, unit)
}

/// Compiles a source text to JavaScript.
///
/// # Errors
/// Returns an error if lexing or parsing fails, or if a node cannot be
/// translated.
///
/// # Examples
/// ```
/// use nixi::{codegen::core::GenerateOptions, compile_source};
///
/// let options = GenerateOptions { include_runtime: false,
///                                 ..GenerateOptions::default() };
/// let compilation = compile_source(r#"style ".card" { color: "red"; }"#, "<doc>", options).unwrap();
///
/// assert_eq!(compilation.styles, vec![".card".to_string()]);
/// assert!(compilation.imports.is_empty());
/// ```
pub fn compile_source(source: &str,
                      unit: &str,
                      options: GenerateOptions)
                      -> Result<Compilation, SourceError> {
    let program = parse_source(source, unit)?;
    Generator::new(options).generate(&program)
                           .map_err(|e| SourceError::new(unit, e))
}
