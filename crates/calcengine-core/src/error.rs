//! Error types for expression compilation and evaluation.
//!
//! Every failure mode is a distinct, inspectable variant; the engine never
//! coerces an error into a default numeric result. Parse-time problems
//! (lexing, parentheses, operand placement, unknown names, structural RPN
//! defects) are reported from `parse`; domain errors are inherently runtime
//! conditions and surface from `evaluate`.

use thiserror::Error;

/// Result type alias used across the engine.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Error type for all calcengine operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A character run in the input matched no known operator symbol.
    #[error("unknown operator '{text}' at position {position}")]
    Lex {
        /// The offending character run.
        text: String,
        /// 1-based character offset of the run in the input.
        position: usize,
    },

    /// Unbalanced or misplaced parentheses.
    #[error("mismatched parentheses")]
    MismatchedParen,

    /// An operator appeared where one of its operands should be.
    #[error("missing operand(s) for operator '{symbol}' at position {position}")]
    MissingOperand {
        /// The operator symbol that is missing an operand.
        symbol: String,
        /// 1-based character offset of the operator in the input.
        position: usize,
    },

    /// A name reached evaluation without a registered binding.
    #[error("unknown operator or function: {name}")]
    UnknownSymbol {
        /// The unregistered name.
        name: String,
    },

    /// A function was called with the wrong number of arguments.
    #[error(
        "function '{function}' expects {}{expected} argument(s), got {actual}",
        if *variadic { "at least " } else { "" }
    )]
    ArityMismatch {
        /// The function name.
        function: String,
        /// Declared argument count (minimum count for variadic functions).
        expected: usize,
        /// Number of arguments actually supplied.
        actual: usize,
        /// Whether the function accepts a variable number of arguments.
        variadic: bool,
    },

    /// An operator in the RPN program has fewer operands than it consumes.
    #[error("too few operands for operator '{symbol}'")]
    TooFewOperands {
        /// The starved operator symbol.
        symbol: String,
    },

    /// The RPN program leaves more than one value on the stack.
    #[error("too many operands in expression")]
    TooManyOperands,

    /// The expression contains no operands at all.
    #[error("empty expression")]
    EmptyExpression,

    /// A mathematically undefined result (negative square root, factorial
    /// of a negative number, a tangent asymptote, division by zero, or a
    /// value outside the representable decimal range).
    #[error("{message}")]
    Domain {
        /// Human-readable description of the undefined condition.
        message: String,
    },

    /// A digit string contains a character outside the radix alphabet.
    #[error("not a base-{base} numeral: \"{text}\"")]
    RadixFormat {
        /// The rejected digit string.
        text: String,
        /// The radix base (2, 8 or 16).
        base: u32,
    },
}

impl EngineError {
    /// Shorthand for a [`EngineError::Domain`] with the given message.
    pub fn domain(message: impl Into<String>) -> Self {
        EngineError::Domain {
            message: message.into(),
        }
    }

    /// Domain error for decimal overflow, shared by the checked arithmetic
    /// paths.
    pub fn overflow() -> Self {
        EngineError::domain("value out of range for decimal arithmetic")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn arity_mismatch_display_distinguishes_variadic() {
        let fixed = EngineError::ArityMismatch {
            function: "ROUND".into(),
            expected: 2,
            actual: 1,
            variadic: false,
        };
        assert_eq!(
            fixed.to_string(),
            "function 'ROUND' expects 2 argument(s), got 1"
        );

        let variadic = EngineError::ArityMismatch {
            function: "MAX".into(),
            expected: 1,
            actual: 0,
            variadic: true,
        };
        assert_eq!(
            variadic.to_string(),
            "function 'MAX' expects at least 1 argument(s), got 0"
        );
    }

    #[test]
    fn lex_error_reports_offset() {
        let err = EngineError::Lex {
            text: "&".into(),
            position: 3,
        };
        assert_eq!(err.to_string(), "unknown operator '&' at position 3");
    }
}
