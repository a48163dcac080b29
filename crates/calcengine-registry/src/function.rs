//! Function definitions and lazy argument access.
//!
//! Functions receive their arguments as unforced thunks and decide which
//! ones to evaluate. Most built-ins force everything up front; `IF` forces
//! only the condition and the selected branch, which is what keeps an
//! erroring subexpression in the untaken branch from aborting evaluation.

use calcengine_core::{EngineError, EvalContext, Result};
use rust_decimal::Decimal;

/// Declared argument count of a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many arguments.
    Fixed(usize),
    /// Any number of arguments; the function checks its own minimum.
    Variadic,
}

impl Arity {
    /// Whether a call with `count` arguments satisfies this arity.
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Fixed(n) => n == count,
            Arity::Variadic => true,
        }
    }
}

/// A deferred numeric computation, forced on demand.
pub trait Thunk {
    /// Evaluate the computation and produce its value.
    fn force(&self) -> Result<Decimal>;
}

/// The argument list passed to a function implementation. Arguments are
/// forced individually and on demand, in whatever order the function asks
/// for them.
pub struct Arguments<'a> {
    thunks: &'a [&'a dyn Thunk],
}

impl<'a> Arguments<'a> {
    /// Wrap a slice of argument thunks.
    pub fn new(thunks: &'a [&'a dyn Thunk]) -> Self {
        Self { thunks }
    }

    /// Number of arguments in the call.
    pub fn len(&self) -> usize {
        self.thunks.len()
    }

    /// Whether the call has no arguments.
    pub fn is_empty(&self) -> bool {
        self.thunks.is_empty()
    }

    /// Force the argument at `index`.
    pub fn value(&self, index: usize) -> Result<Decimal> {
        self.thunks
            .get(index)
            .ok_or_else(|| EngineError::domain(format!("missing argument {index}")))?
            .force()
    }

    /// Force every argument, left to right.
    pub fn values(&self) -> Result<Vec<Decimal>> {
        self.thunks.iter().map(|thunk| thunk.force()).collect()
    }
}

/// A registered named function. Immutable once registered; identity is the
/// upper-cased name.
pub trait Function: Send + Sync {
    /// The function name as registered, e.g. `SIN`.
    fn name(&self) -> &str;

    /// Declared arity; [`Arity::Variadic`] for a variable argument count.
    fn arity(&self) -> Arity;

    /// Evaluate a call, forcing only the arguments it needs.
    fn invoke(&self, args: &Arguments<'_>, ctx: &EvalContext) -> Result<Decimal>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_arity_accepts_exact_count_only() {
        assert!(Arity::Fixed(2).accepts(2));
        assert!(!Arity::Fixed(2).accepts(1));
        assert!(Arity::Variadic.accepts(0));
        assert!(Arity::Variadic.accepts(9));
    }
}
