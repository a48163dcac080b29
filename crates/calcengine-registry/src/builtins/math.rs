//! General numeric built-ins.

use std::sync::Arc;

use calcengine_core::{EngineError, EvalContext, Result};
use rust_decimal::prelude::*;
use rust_decimal::Decimal;

use crate::builtins::operators::power;
use crate::builtins::trig::unary_function;
use crate::function::{Arguments, Arity, Function};
use crate::registry::Registry;

pub(crate) fn install(registry: &mut Registry) {
    registry.register_function(Arc::new(Abs));
    registry.register_function(Arc::new(Log));
    registry.register_function(Arc::new(Log10));
    registry.register_function(Arc::new(Round));
    registry.register_function(Arc::new(Floor));
    registry.register_function(Arc::new(Ceiling));
    registry.register_function(Arc::new(Sqrt));
    registry.register_function(Arc::new(Fac));
    registry.register_function(Arc::new(Pow));
    registry.register_function(Arc::new(Cbrt));
}

unary_function!(Abs, "ABS", |value, _ctx| Ok(value.abs()));

unary_function!(Log, "LOG", |value, _ctx| {
    if value <= Decimal::ZERO {
        return Err(EngineError::domain("logarithm of a non-positive value"));
    }
    let logarithm = value.to_f64().ok_or_else(EngineError::overflow)?.ln();
    Decimal::from_f64(logarithm).ok_or_else(EngineError::overflow)
});

unary_function!(Log10, "LOG10", |value, _ctx| {
    if value <= Decimal::ZERO {
        return Err(EngineError::domain("logarithm of a non-positive value"));
    }
    let logarithm = value.to_f64().ok_or_else(EngineError::overflow)?.log10();
    Decimal::from_f64(logarithm).ok_or_else(EngineError::overflow)
});

unary_function!(Floor, "FLOOR", |value, _ctx| Ok(value.floor()));

unary_function!(Ceiling, "CEILING", |value, _ctx| Ok(value.ceil()));

unary_function!(Fac, "FAC", |value, _ctx| {
    if value.is_sign_negative() {
        return Err(EngineError::domain("factorial of a negative value"));
    }
    let count = value
        .trunc()
        .to_u64()
        .ok_or_else(EngineError::overflow)?;
    let mut product = Decimal::ONE;
    for factor in 2..=count {
        product = product
            .checked_mul(Decimal::from(factor))
            .ok_or_else(EngineError::overflow)?;
    }
    Ok(product)
});

unary_function!(Cbrt, "CBRT", |value, _ctx| {
    let root = value.to_f64().ok_or_else(EngineError::overflow)?.cbrt();
    Decimal::from_f64(root).ok_or_else(EngineError::overflow)
});

unary_function!(Sqrt, "SQRT", |value, ctx| sqrt(value, ctx));

/// `ROUND(value, digits)`: round to a fixed number of fractional digits
/// under the context rounding strategy.
struct Round;

impl Function for Round {
    fn name(&self) -> &str {
        "ROUND"
    }

    fn arity(&self) -> Arity {
        Arity::Fixed(2)
    }

    fn invoke(&self, args: &Arguments<'_>, ctx: &EvalContext) -> Result<Decimal> {
        let value = args.value(0)?;
        let digits = args
            .value(1)?
            .trunc()
            .to_u32()
            .ok_or_else(|| EngineError::domain("rounding digit count out of range"))?;
        Ok(value.round_dp_with_strategy(digits, ctx.math.rounding))
    }
}

/// `POW(base, exponent)`: function form of the `^` operator.
struct Pow;

impl Function for Pow {
    fn name(&self) -> &str {
        "POW"
    }

    fn arity(&self) -> Arity {
        Arity::Fixed(2)
    }

    fn invoke(&self, args: &Arguments<'_>, ctx: &EvalContext) -> Result<Decimal> {
        power(args.value(0)?, args.value(1)?, ctx)
    }
}

/// Square root via integer Newton iteration.
///
/// The operand's mantissa is placed on an even power-of-ten grid and padded
/// until the root carries at least half the context precision (never less
/// than 16 digits), then `isqrt` runs on the `u128` and the result scale is
/// halved. Staying in integers the whole way avoids accumulating binary
/// floating-point error at high precision.
fn sqrt(value: Decimal, ctx: &EvalContext) -> Result<Decimal> {
    if value.is_sign_negative() {
        return Err(EngineError::domain("square root of a negative value"));
    }
    if value.is_zero() {
        return Ok(Decimal::ZERO);
    }

    let mut mantissa = value.mantissa() as u128;
    let mut scale = value.scale();
    if scale % 2 == 1 {
        match mantissa.checked_mul(10) {
            Some(widened) => {
                mantissa = widened;
                scale += 1;
            }
            None => {
                mantissa /= 10;
                scale -= 1;
            }
        }
    }

    let mut half_scale = scale / 2;
    let target = (ctx.math.precision / 2).max(16).min(28);
    while half_scale < target {
        match mantissa.checked_mul(100) {
            Some(widened) => {
                mantissa = widened;
                half_scale += 1;
            }
            None => break,
        }
    }

    let root = isqrt(mantissa);
    Decimal::try_from_i128_with_scale(root as i128, half_scale)
        .map(|result| result.normalize())
        .map_err(|_| EngineError::overflow())
}

/// Integer square root, rounded down. Newton iteration from an
/// over-estimate is monotonically decreasing, so the loop terminates when
/// an iterate stops shrinking; the iteration cap is a safety bound, the
/// method converges in well under 200 steps for any `u128`.
fn isqrt(n: u128) -> u128 {
    if n < 2 {
        return n;
    }
    let mut x = 1u128 << ((128 - n.leading_zeros()).div_ceil(2));
    let mut next = (x + n / x) / 2;
    let mut remaining = 200;
    while next < x && remaining > 0 {
        x = next;
        next = (x + n / x) / 2;
        remaining -= 1;
    }
    x
}
