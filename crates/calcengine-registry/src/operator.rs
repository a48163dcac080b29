//! Binary operator definitions.

use std::fmt;

use calcengine_core::{EvalContext, Result};
use rust_decimal::Decimal;

type ApplyFn = Box<dyn Fn(Decimal, Decimal, &EvalContext) -> Result<Decimal> + Send + Sync>;

/// Operator associativity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
    /// `a op b op c` groups as `(a op b) op c`.
    Left,
    /// `a op b op c` groups as `a op (b op c)`.
    Right,
}

/// A registered binary operator: symbol, precedence, associativity and a
/// pure application function. Immutable once registered; identity is the
/// symbol string.
pub struct OperatorDef {
    symbol: String,
    precedence: u32,
    assoc: Assoc,
    apply: ApplyFn,
}

impl OperatorDef {
    /// Create a new operator definition.
    pub fn new<F>(symbol: impl Into<String>, precedence: u32, assoc: Assoc, apply: F) -> Self
    where
        F: Fn(Decimal, Decimal, &EvalContext) -> Result<Decimal> + Send + Sync + 'static,
    {
        Self {
            symbol: symbol.into(),
            precedence,
            assoc,
            apply: Box::new(apply),
        }
    }

    /// The operator symbol, e.g. `+` or `>=`.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Binding strength; higher binds tighter.
    pub fn precedence(&self) -> u32 {
        self.precedence
    }

    /// Associativity used by the shunting-yard pop rule.
    pub fn assoc(&self) -> Assoc {
        self.assoc
    }

    /// Apply the operator to two already-evaluated operands.
    pub fn apply(&self, lhs: Decimal, rhs: Decimal, ctx: &EvalContext) -> Result<Decimal> {
        (self.apply)(lhs, rhs, ctx)
    }
}

impl fmt::Debug for OperatorDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperatorDef")
            .field("symbol", &self.symbol)
            .field("precedence", &self.precedence)
            .field("assoc", &self.assoc)
            .finish_non_exhaustive()
    }
}
