/// Operator dispatch and assignment.
pub mod core;

/// `+ - * /`, including string concatenation.
pub mod arithmetic;

/// Equality and ordering.
pub mod comparison;

/// `&&` and `||` over truthiness.
pub mod logic;
