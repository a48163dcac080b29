//! Evaluation context: angle mode and numeric precision/rounding policy.
//!
//! The context is owned by the engine instance and passed explicitly into
//! every operator and function implementation. It is never read through
//! ambient global state, so two engines with different settings can coexist
//! in one process.

use rust_decimal::{Decimal, RoundingStrategy};

/// Default number of fractional digits kept by precision-sensitive
/// operations (division, reciprocal powers). 28 is the ceiling of the
/// underlying 96-bit decimal representation.
pub const DEFAULT_PRECISION: u32 = 28;

/// The unit in which trigonometric arguments and results are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AngleMode {
    /// Degrees, a full turn is 360. The default when nothing was configured.
    #[default]
    Degree,
    /// Radians, a full turn is 2π.
    Radian,
    /// Gradians, a full turn is 400.
    Gradian,
}

/// Numeric precision and rounding policy, the analogue of a `MathContext`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MathSettings {
    /// Fractional digits kept when an operation must round.
    pub precision: u32,
    /// Rounding strategy applied at those points.
    pub rounding: RoundingStrategy,
}

impl Default for MathSettings {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            rounding: RoundingStrategy::MidpointNearestEven,
        }
    }
}

/// Mutable engine configuration consulted during evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EvalContext {
    /// Active angle mode for the trigonometric functions.
    pub angle_mode: AngleMode,
    /// Active precision and rounding policy for arithmetic.
    pub math: MathSettings,
}

impl EvalContext {
    /// Round a value to the context precision using the context strategy.
    pub fn round(&self, value: Decimal) -> Decimal {
        value.round_dp_with_strategy(self.math.precision, self.math.rounding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    #[test]
    fn angle_mode_defaults_to_degree() {
        assert_eq!(EvalContext::default().angle_mode, AngleMode::Degree);
    }

    #[test]
    fn round_honours_configured_precision() {
        let ctx = EvalContext {
            math: MathSettings {
                precision: 2,
                rounding: RoundingStrategy::MidpointAwayFromZero,
            },
            ..EvalContext::default()
        };
        let rounded = ctx.round(Decimal::from_str("1.005").unwrap());
        assert_eq!(rounded, Decimal::from_str("1.01").unwrap());
    }
}
