//! Trigonometric built-ins, sensitive to the active angle mode.
//!
//! `SIN`/`COS`/`TAN` reduce the angle modulo a full turn in the active
//! unit before touching the float primitive; results coming back from
//! `f64` are re-widened and settled to 15 fractional digits, which is
//! inside the reliable range of a double and makes `SIN(90)` in degree
//! mode come out as an exact `1`.

use std::sync::Arc;

use calcengine_core::value::PI;
use calcengine_core::{AngleMode, EngineError, EvalContext, Result};
use rust_decimal::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::function::{Arguments, Arity, Function};
use crate::registry::Registry;

/// Fractional digits kept on values re-widened from `f64`.
const FLOAT_SCALE: u32 = 15;

/// Magnitude past which a radian-mode tangent is treated as an asymptote.
const TAN_ASYMPTOTE_LIMIT: f64 = 1e7;

pub(crate) fn install(registry: &mut Registry) {
    registry.register_function(Arc::new(Sin));
    registry.register_function(Arc::new(Cos));
    registry.register_function(Arc::new(Tan));
    registry.register_function(Arc::new(Asin));
    registry.register_function(Arc::new(Acos));
    registry.register_function(Arc::new(Atan));
    registry.register_function(Arc::new(Sinh));
    registry.register_function(Arc::new(Cosh));
    registry.register_function(Arc::new(Tanh));
    registry.register_function(Arc::new(Rad));
    registry.register_function(Arc::new(Deg));
}

/// One full turn in the units of `mode`.
fn full_turn(mode: AngleMode) -> Decimal {
    match mode {
        AngleMode::Degree => Decimal::from(360),
        AngleMode::Radian => *PI * Decimal::TWO,
        AngleMode::Gradian => Decimal::from(400),
    }
}

/// Reduce an angle modulo a full turn, staying in the units of `mode`.
fn reduce(angle: Decimal, mode: AngleMode) -> Decimal {
    angle % full_turn(mode)
}

/// Convert an angle in the units of `mode` into radians as an `f64`.
fn to_radians(angle: Decimal, mode: AngleMode) -> Result<f64> {
    let raw = angle.to_f64().ok_or_else(EngineError::overflow)?;
    Ok(match mode {
        AngleMode::Degree => raw.to_radians(),
        AngleMode::Radian => raw,
        // a gradian is nine tenths of a degree
        AngleMode::Gradian => (raw * 0.9).to_radians(),
    })
}

/// Convert radians back into the units of `mode`.
fn from_radians(radians: f64, mode: AngleMode) -> f64 {
    match mode {
        AngleMode::Degree => radians.to_degrees(),
        AngleMode::Radian => radians,
        AngleMode::Gradian => radians.to_degrees() / 0.9,
    }
}

/// Re-widen a float result, settled to [`FLOAT_SCALE`] fractional digits.
fn widen(value: f64) -> Result<Decimal> {
    if !value.is_finite() {
        return Err(EngineError::overflow());
    }
    let widened = Decimal::from_f64(value).ok_or_else(EngineError::overflow)?;
    Ok(widened
        .round_dp_with_strategy(FLOAT_SCALE, RoundingStrategy::MidpointAwayFromZero)
        .normalize())
}

/// Whether the reduced angle sits on a tangent asymptote in degree or
/// gradian mode (the 90°/100-gradian families). Radian mode has no exact
/// representation of those angles and is checked by result magnitude
/// instead.
fn on_tan_asymptote(reduced: Decimal, mode: AngleMode) -> bool {
    match mode {
        AngleMode::Degree => reduced.abs() % Decimal::from(180) == Decimal::from(90),
        AngleMode::Gradian => reduced.abs() % Decimal::from(200) == Decimal::from(100),
        AngleMode::Radian => false,
    }
}

macro_rules! unary_function {
    ($type:ident, $name:literal, |$arg:ident, $ctx:ident| $body:expr) => {
        struct $type;

        impl Function for $type {
            fn name(&self) -> &str {
                $name
            }

            fn arity(&self) -> Arity {
                Arity::Fixed(1)
            }

            fn invoke(&self, args: &Arguments<'_>, $ctx: &EvalContext) -> Result<Decimal> {
                let $arg = args.value(0)?;
                $body
            }
        }
    };
}
pub(crate) use unary_function;

unary_function!(Sin, "SIN", |angle, ctx| {
    let reduced = reduce(angle, ctx.angle_mode);
    widen(to_radians(reduced, ctx.angle_mode)?.sin())
});

unary_function!(Cos, "COS", |angle, ctx| {
    let reduced = reduce(angle, ctx.angle_mode);
    widen(to_radians(reduced, ctx.angle_mode)?.cos())
});

unary_function!(Tan, "TAN", |angle, ctx| {
    let reduced = reduce(angle, ctx.angle_mode);
    if on_tan_asymptote(reduced, ctx.angle_mode) {
        return Err(EngineError::domain("tangent undefined at this angle"));
    }
    let tangent = to_radians(reduced, ctx.angle_mode)?.tan();
    if ctx.angle_mode == AngleMode::Radian && tangent.abs() > TAN_ASYMPTOTE_LIMIT {
        return Err(EngineError::domain("tangent undefined at this angle"));
    }
    widen(tangent)
});

unary_function!(Asin, "ASIN", |value, ctx| {
    if value.abs() > Decimal::ONE {
        return Err(EngineError::domain("arcsine argument outside [-1, 1]"));
    }
    let radians = value.to_f64().ok_or_else(EngineError::overflow)?.asin();
    widen(from_radians(radians, ctx.angle_mode))
});

unary_function!(Acos, "ACOS", |value, ctx| {
    if value.abs() > Decimal::ONE {
        return Err(EngineError::domain("arccosine argument outside [-1, 1]"));
    }
    let radians = value.to_f64().ok_or_else(EngineError::overflow)?.acos();
    widen(from_radians(radians, ctx.angle_mode))
});

unary_function!(Atan, "ATAN", |value, ctx| {
    let radians = value.to_f64().ok_or_else(EngineError::overflow)?.atan();
    widen(from_radians(radians, ctx.angle_mode))
});

// The hyperbolics are not angle functions: the argument is taken as-is,
// whatever the active angle mode.
unary_function!(Sinh, "SINH", |value, _ctx| {
    widen(value.to_f64().ok_or_else(EngineError::overflow)?.sinh())
});

unary_function!(Cosh, "COSH", |value, _ctx| {
    widen(value.to_f64().ok_or_else(EngineError::overflow)?.cosh())
});

unary_function!(Tanh, "TANH", |value, _ctx| {
    widen(value.to_f64().ok_or_else(EngineError::overflow)?.tanh())
});

unary_function!(Rad, "RAD", |degrees, ctx| {
    degrees
        .checked_mul(*PI)
        .and_then(|scaled| scaled.checked_div(Decimal::from(180)))
        .map(|radians| ctx.round(radians))
        .ok_or_else(EngineError::overflow)
});

unary_function!(Deg, "DEG", |radians, ctx| {
    radians
        .checked_mul(Decimal::from(180))
        .and_then(|scaled| scaled.checked_div(*PI))
        .map(|degrees| ctx.round(degrees))
        .ok_or_else(EngineError::overflow)
});
