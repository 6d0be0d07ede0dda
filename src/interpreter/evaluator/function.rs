/// Numeric built-ins: `add`, `subtract`, `multiply`, `divide`.
pub mod arithmetic;
/// String built-ins and `echo`.
pub mod text;
/// `map` and `length`.
pub mod collection;
/// Host filesystem built-ins: `ls`, `cd`, `pwd`.
///
/// These operate on the real process working directory.
pub mod system;
/// Markup element constructors (`div`, `span`, ...).
pub mod element;
/// Bridge to the presentation collaborator: `renderHTML`, `saveHTML`,
/// `addStyle`.
pub mod presentation;

pub mod core;
