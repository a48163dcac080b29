//! Evaluation of compiled RPN programs.
//!
//! The program is folded once into a tagged evaluation tree
//! ([`node::Node`]), then walked recursively. Function arguments are
//! passed as unforced thunks, which gives `IF` its short-circuit
//! semantics. Three radix lenses reinterpret operand digit text through
//! binary, octal or hexadecimal around the unchanged decimal operator
//! table.

pub mod eval;
pub mod node;
pub mod result;

pub use eval::{evaluate, evaluate_decimal, RADIX_FRACTION_DIGITS};
pub use node::Node;
pub use result::{Lens, NumericResult};
