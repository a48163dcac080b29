//! Symbol registry for the calcengine expression engine.
//!
//! Three independent tables — operators, functions, variables — with the
//! complete built-in set. Operator symbol lookup is case-sensitive (the
//! symbols are punctuation); function and variable lookup is
//! case-insensitive. Registration is last-write-wins and returns the
//! previous binding, so a host can override a built-in and restore it
//! later.

pub mod builtins;
pub mod function;
pub mod operator;
pub mod registry;

pub use function::{Arguments, Arity, Function, Thunk};
pub use operator::{Assoc, OperatorDef};
pub use registry::Registry;
