//! Logical built-ins, including the short-circuiting `IF`.

use std::sync::Arc;

use calcengine_core::value::is_truthy;
use calcengine_core::{EngineError, EvalContext, Result};
use rust_decimal::prelude::*;
use rust_decimal::Decimal;

use crate::function::{Arguments, Arity, Function};
use crate::registry::Registry;

pub(crate) fn install(registry: &mut Registry) {
    registry.register_function(Arc::new(Not));
    registry.register_function(Arc::new(If));
    registry.register_function(Arc::new(Random));
}

struct Not;

impl Function for Not {
    fn name(&self) -> &str {
        "NOT"
    }

    fn arity(&self) -> Arity {
        Arity::Fixed(1)
    }

    fn invoke(&self, args: &Arguments<'_>, _ctx: &EvalContext) -> Result<Decimal> {
        Ok(if is_truthy(args.value(0)?) {
            Decimal::ZERO
        } else {
            Decimal::ONE
        })
    }
}

/// `IF(condition, then, otherwise)`. Only the selected branch is forced;
/// an error buried in the untaken branch never surfaces.
struct If;

impl Function for If {
    fn name(&self) -> &str {
        "IF"
    }

    fn arity(&self) -> Arity {
        Arity::Fixed(3)
    }

    fn invoke(&self, args: &Arguments<'_>, _ctx: &EvalContext) -> Result<Decimal> {
        if is_truthy(args.value(0)?) {
            args.value(1)
        } else {
            args.value(2)
        }
    }
}

/// `RANDOM()`: a uniform value in `[0, 1)`.
struct Random;

impl Function for Random {
    fn name(&self) -> &str {
        "RANDOM"
    }

    fn arity(&self) -> Arity {
        Arity::Fixed(0)
    }

    fn invoke(&self, _args: &Arguments<'_>, _ctx: &EvalContext) -> Result<Decimal> {
        Decimal::from_f64(fastrand::f64()).ok_or_else(EngineError::overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::Thunk;
    use pretty_assertions::assert_eq;

    struct Ready(Decimal);

    impl Thunk for Ready {
        fn force(&self) -> Result<Decimal> {
            Ok(self.0)
        }
    }

    /// A thunk that must never be forced.
    struct Poison;

    impl Thunk for Poison {
        fn force(&self) -> Result<Decimal> {
            Err(EngineError::domain("poison branch was forced"))
        }
    }

    fn function(name: &str) -> Arc<dyn Function> {
        Registry::new().function(name).unwrap().clone()
    }

    #[test]
    fn if_forces_only_the_selected_branch() {
        let condition = Ready(Decimal::ONE);
        let then = Ready(Decimal::from(5));
        let poison = Poison;
        let thunks: [&dyn Thunk; 3] = [&condition, &then, &poison];
        let result = function("IF")
            .invoke(&Arguments::new(&thunks), &EvalContext::default())
            .unwrap();
        assert_eq!(result, Decimal::from(5));
    }

    #[test]
    fn if_selects_the_else_branch_on_zero() {
        let condition = Ready(Decimal::ZERO);
        let poison = Poison;
        let otherwise = Ready(Decimal::from(9));
        let thunks: [&dyn Thunk; 3] = [&condition, &poison, &otherwise];
        let result = function("IF")
            .invoke(&Arguments::new(&thunks), &EvalContext::default())
            .unwrap();
        assert_eq!(result, Decimal::from(9));
    }

    #[test]
    fn not_inverts_truthiness() {
        let truthy = Ready(Decimal::from(7));
        let thunks: [&dyn Thunk; 1] = [&truthy];
        let result = function("NOT")
            .invoke(&Arguments::new(&thunks), &EvalContext::default())
            .unwrap();
        assert_eq!(result, Decimal::ZERO);
    }

    #[test]
    fn random_stays_in_the_unit_interval() {
        for _ in 0..32 {
            let value = function("RANDOM")
                .invoke(&Arguments::new(&[]), &EvalContext::default())
                .unwrap();
            assert!(value >= Decimal::ZERO && value < Decimal::ONE);
        }
    }
}
