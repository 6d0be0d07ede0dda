/// The `Value` enum and its conversions, truthiness and text forms.
pub mod core;

/// Callable values: closures and built-ins.
pub mod function;

/// Persistent scope chains captured by closures.
pub mod environment;
