/// Binary operator evaluation logic.
///
/// Handles assignment, arithmetic with string concatenation, comparisons and
/// the eager logical operators.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements arithmetic negation and logical NOT.
pub mod unary;

/// Core evaluation logic and context management.
///
/// Contains the main evaluation engine, the runtime context, name resolution
/// and error propagation.
pub mod core;

/// Evaluation of markup elements into strings.
pub mod markup;

/// Utility functions for evaluation.
///
/// Provides helpers shared by the evaluator and the built-in functions.
pub mod utils;

/// Function evaluation.
///
/// Handles closure and built-in calls, component instantiation, argument
/// checking and the built-in function table.
pub mod function;
