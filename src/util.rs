/// Numeric conversion and formatting helpers.
///
/// Provides lossless integer to float conversion for literals and counts, and
/// the number formatting shared by the evaluator and the code generator.
pub mod num;
