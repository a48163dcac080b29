//! The engine facade: one registry, one evaluation context, and the
//! parse/evaluate entry points.

use std::sync::Arc;

use calcengine_core::{AngleMode, EvalContext, MathSettings, Result};
use calcengine_evaluator::{evaluate, evaluate_decimal, Lens, NumericResult};
use calcengine_parser::{self as parser, RpnProgram};
use calcengine_registry::{Function, OperatorDef, Registry};
use rust_decimal::{Decimal, RoundingStrategy};

/// An expression engine instance.
///
/// Owns a symbol registry and an evaluation context. Parsing and
/// evaluation take `&self`; registry and context mutation take
/// `&mut self`, so the borrow checker enforces the no-mutation-during-
/// evaluation contract within one thread. Sharing an engine across
/// threads is safe for concurrent evaluation; wrap it in a read-write
/// lock if any thread also mutates bindings.
#[derive(Default)]
pub struct Engine {
    registry: Registry,
    ctx: EvalContext,
}

impl Engine {
    /// An engine with the complete built-in symbol set, degree angle
    /// mode and default precision.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile an infix expression to a reusable RPN program.
    pub fn parse(&self, expression: &str) -> Result<RpnProgram> {
        parser::parse(expression, &self.registry)
    }

    /// Compile an expression for the given lens. Only the hexadecimal
    /// lens changes the grammar (its literals may contain `A`-`F`).
    pub fn parse_radix(&self, expression: &str, lens: Lens) -> Result<RpnProgram> {
        match lens {
            Lens::Hex => parser::parse_hex(expression, &self.registry),
            _ => parser::parse(expression, &self.registry),
        }
    }

    /// Evaluate a compiled program under a lens.
    pub fn evaluate(&self, program: &RpnProgram, lens: Lens) -> Result<NumericResult> {
        evaluate(program, &self.registry, &self.ctx, lens)
    }

    /// Parse and evaluate in one step under the decimal lens.
    pub fn eval(&self, expression: &str) -> Result<Decimal> {
        let program = self.parse(expression)?;
        evaluate_decimal(&program, &self.registry, &self.ctx)
    }

    /// Parse and evaluate in one step under the given lens.
    pub fn eval_with(&self, expression: &str, lens: Lens) -> Result<NumericResult> {
        let program = self.parse_radix(expression, lens)?;
        self.evaluate(&program, lens)
    }

    /// Register (or override) an operator; returns the previous
    /// definition bound to the same symbol.
    pub fn register_operator(&mut self, operator: OperatorDef) -> Option<Arc<OperatorDef>> {
        self.registry.register_operator(operator)
    }

    /// Register (or override) a function; returns the previous
    /// definition bound to the same name.
    pub fn register_function(&mut self, function: Arc<dyn Function>) -> Option<Arc<dyn Function>> {
        self.registry.register_function(function)
    }

    /// Bind a variable; returns the previous value, if any.
    pub fn set_variable(&mut self, name: &str, value: Decimal) -> Option<Decimal> {
        self.registry.set_variable(name, value)
    }

    /// Set the angle mode consulted by the trigonometric functions.
    pub fn set_angle_mode(&mut self, mode: AngleMode) {
        self.ctx.angle_mode = mode;
    }

    pub fn angle_mode(&self) -> AngleMode {
        self.ctx.angle_mode
    }

    /// Set the fractional-digit precision and rounding strategy used by
    /// precision-sensitive arithmetic.
    pub fn set_precision(&mut self, digits: u32, rounding: RoundingStrategy) {
        self.ctx.math = MathSettings {
            precision: digits,
            rounding,
        };
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn context(&self) -> &EvalContext {
        &self.ctx
    }
}
