/// The generator state, options and program-level emission.
pub mod core;

/// Expression emission: one JavaScript fragment per syntax tree node.
pub mod expr;

/// The JavaScript runtime prelude generated programs depend on.
pub mod runtime;

/// String quoting and name mangling for emitted JavaScript.
pub mod utils;
