//! Variadic aggregates over one or more arguments.

use std::sync::Arc;

use calcengine_core::{EngineError, EvalContext, Result};
use rust_decimal::Decimal;

use crate::function::{Arguments, Arity, Function};
use crate::registry::Registry;

pub(crate) fn install(registry: &mut Registry) {
    registry.register_function(Arc::new(Max));
    registry.register_function(Arc::new(Min));
}

fn require_arguments(name: &str, args: &Arguments<'_>) -> Result<()> {
    if args.is_empty() {
        return Err(EngineError::ArityMismatch {
            function: name.to_string(),
            expected: 1,
            actual: 0,
            variadic: true,
        });
    }
    Ok(())
}

struct Max;

impl Function for Max {
    fn name(&self) -> &str {
        "MAX"
    }

    fn arity(&self) -> Arity {
        Arity::Variadic
    }

    fn invoke(&self, args: &Arguments<'_>, _ctx: &EvalContext) -> Result<Decimal> {
        require_arguments("MAX", args)?;
        let mut best = args.value(0)?;
        for index in 1..args.len() {
            best = best.max(args.value(index)?);
        }
        Ok(best)
    }
}

struct Min;

impl Function for Min {
    fn name(&self) -> &str {
        "MIN"
    }

    fn arity(&self) -> Arity {
        Arity::Variadic
    }

    fn invoke(&self, args: &Arguments<'_>, _ctx: &EvalContext) -> Result<Decimal> {
        require_arguments("MIN", args)?;
        let mut best = args.value(0)?;
        for index in 1..args.len() {
            best = best.min(args.value(index)?);
        }
        Ok(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::Thunk;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    struct Ready(Decimal);

    impl Thunk for Ready {
        fn force(&self) -> Result<Decimal> {
            Ok(self.0)
        }
    }

    fn call(name: &str, arguments: &[&str]) -> Result<Decimal> {
        let registry = Registry::new();
        let function = registry.function(name).unwrap().clone();
        let ready: Vec<Ready> = arguments
            .iter()
            .map(|a| Ready(Decimal::from_str(a).unwrap()))
            .collect();
        let thunks: Vec<&dyn Thunk> = ready.iter().map(|r| r as &dyn Thunk).collect();
        function.invoke(&Arguments::new(&thunks), &EvalContext::default())
    }

    #[test]
    fn max_and_min_scan_all_arguments() {
        assert_eq!(call("MAX", &["1", "5", "3"]).unwrap(), Decimal::from(5));
        assert_eq!(call("MIN", &["1", "5", "3"]).unwrap(), Decimal::ONE);
        assert_eq!(call("MAX", &["-7"]).unwrap(), Decimal::from(-7));
    }

    #[test]
    fn zero_arguments_is_an_arity_mismatch() {
        assert_eq!(
            call("MAX", &[]),
            Err(EngineError::ArityMismatch {
                function: "MAX".into(),
                expected: 1,
                actual: 0,
                variadic: true,
            })
        );
        assert!(call("MIN", &[]).is_err());
    }
}
