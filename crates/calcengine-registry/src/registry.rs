//! The symbol registry: operators, functions and variables.

use std::sync::Arc;

use calcengine_core::value::{E, PI};
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;

use crate::builtins;
use crate::function::Function;
use crate::operator::OperatorDef;

/// Three independent symbol tables shared by the parser and the evaluator.
///
/// Operator lookup is case-sensitive; function and variable lookup is
/// case-insensitive (keys are stored upper-cased). Registration is
/// last-write-wins and hands back the previous binding so a host can
/// override a built-in and restore it afterwards.
pub struct Registry {
    operators: FxHashMap<String, Arc<OperatorDef>>,
    functions: FxHashMap<String, Arc<dyn Function>>,
    variables: FxHashMap<String, Decimal>,
}

impl Registry {
    /// A registry with no symbols at all. Mostly useful in tests.
    pub fn empty() -> Self {
        Self {
            operators: FxHashMap::default(),
            functions: FxHashMap::default(),
            variables: FxHashMap::default(),
        }
    }

    /// A registry populated with the complete built-in operator and
    /// function set and the constants `PI`, `e`, `TRUE` and `FALSE`.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        builtins::install(&mut registry);
        registry.set_variable("PI", *PI);
        registry.set_variable("e", *E);
        registry.set_variable("TRUE", Decimal::ONE);
        registry.set_variable("FALSE", Decimal::ZERO);
        registry
    }

    /// Register (or replace) an operator, returning the previous definition
    /// bound to the same symbol.
    pub fn register_operator(&mut self, operator: OperatorDef) -> Option<Arc<OperatorDef>> {
        let symbol = operator.symbol().to_string();
        let previous = self.operators.insert(symbol.clone(), Arc::new(operator));
        if previous.is_some() {
            log::debug!("operator '{symbol}' redefined");
        }
        previous
    }

    /// Register (or replace) a function, returning the previous definition
    /// bound to the same name.
    pub fn register_function(&mut self, function: Arc<dyn Function>) -> Option<Arc<dyn Function>> {
        let key = function.name().to_uppercase();
        let previous = self.functions.insert(key.clone(), function);
        if previous.is_some() {
            log::debug!("function '{key}' redefined");
        }
        previous
    }

    /// Bind (or rebind) a variable, returning the previous value.
    pub fn set_variable(&mut self, name: &str, value: Decimal) -> Option<Decimal> {
        self.variables.insert(name.to_uppercase(), value)
    }

    /// Look up an operator by its exact symbol.
    pub fn operator(&self, symbol: &str) -> Option<&Arc<OperatorDef>> {
        self.operators.get(symbol)
    }

    /// Look up a function by name, case-insensitively.
    pub fn function(&self, name: &str) -> Option<&Arc<dyn Function>> {
        self.functions.get(&name.to_uppercase())
    }

    /// Read a variable's current value, case-insensitively.
    pub fn variable(&self, name: &str) -> Option<Decimal> {
        self.variables.get(&name.to_uppercase()).copied()
    }

    /// Whether the exact symbol is a registered operator.
    pub fn is_operator(&self, symbol: &str) -> bool {
        self.operators.contains_key(symbol)
    }

    /// Whether the name is a registered function.
    pub fn is_function(&self, name: &str) -> bool {
        self.functions.contains_key(&name.to_uppercase())
    }

    /// Whether the name is a bound variable.
    pub fn is_variable(&self, name: &str) -> bool {
        self.variables.contains_key(&name.to_uppercase())
    }

    /// Length in characters of the longest registered operator symbol.
    /// The tokenizer uses this to bound its greedy operator match.
    pub fn max_operator_len(&self) -> usize {
        self.operators.keys().map(|s| s.chars().count()).max().unwrap_or(0)
    }

    /// All registered operator symbols, sorted.
    pub fn operator_symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self.operators.keys().map(String::as_str).collect();
        symbols.sort_unstable();
        symbols
    }

    /// All registered function names, sorted.
    pub fn function_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// All bound variable names, sorted.
    pub fn variable_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.variables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("operators", &self.operator_symbols())
            .field("functions", &self.function_names())
            .field("variables", &self.variable_names())
            .finish()
    }
}
