//! An embeddable arbitrary-precision decimal expression engine.
//!
//! Expressions are compiled once to a postfix program and evaluated any
//! number of times against an extensible registry of operators,
//! functions and variables:
//!
//! ```
//! use calcengine::Engine;
//! use rust_decimal::Decimal;
//!
//! let engine = Engine::new();
//! assert_eq!(engine.eval("2+3*4").unwrap(), Decimal::from(14));
//! ```
//!
//! Evaluation lenses reinterpret the same grammar through binary, octal
//! or hexadecimal digits:
//!
//! ```
//! use calcengine::{Engine, Lens};
//!
//! let engine = Engine::new();
//! let result = engine.eval_with("6B - 3E", Lens::Hex).unwrap();
//! assert_eq!(result.to_string(), "2D");
//! ```

mod engine;

pub use engine::Engine;

pub use calcengine_core::value::{E, PI};
pub use calcengine_core::{
    AngleMode, EngineError, EvalContext, MathSettings, Result, DEFAULT_PRECISION,
};
pub use calcengine_evaluator::{Lens, NumericResult, RADIX_FRACTION_DIGITS};
pub use calcengine_parser::RpnProgram;
pub use calcengine_radix::Radix;
pub use calcengine_registry::{Arguments, Arity, Assoc, Function, OperatorDef, Registry, Thunk};

pub use rust_decimal::{Decimal, RoundingStrategy};

/// Render a decimal value as a digit string in `radix`, keeping at most
/// `fraction_limit` fractional digits. Usable independently of
/// evaluation, e.g. for plain numeric display.
pub fn to_radix_string(value: Decimal, radix: Radix, fraction_limit: usize) -> String {
    calcengine_radix::encode(value, radix, fraction_limit)
}

/// Parse a digit string in `radix` back into a decimal value.
pub fn from_radix_string(text: &str, radix: Radix) -> Result<Decimal> {
    calcengine_radix::decode(text, radix)
}
