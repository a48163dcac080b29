//! Core types shared by every calcengine crate.
//!
//! This crate is the leaf of the workspace: the error taxonomy, the
//! evaluation context (angle mode and precision/rounding policy) and a few
//! decimal helpers. Nothing here parses or evaluates anything.

pub mod context;
pub mod error;
pub mod value;

pub use context::{AngleMode, EvalContext, MathSettings, DEFAULT_PRECISION};
pub use error::{EngineError, Result};
pub use value::{is_truthy, parse_decimal, to_plain_string, E, PI};
