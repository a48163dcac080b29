//! The built-in operator and function set.

pub mod aggregate;
pub mod logic;
pub mod math;
pub mod operators;
pub mod trig;

use crate::registry::Registry;

/// Install every built-in operator and function into `registry`.
pub(crate) fn install(registry: &mut Registry) {
    operators::install(registry);
    trig::install(registry);
    math::install(registry);
    aggregate::install(registry);
    logic::install(registry);
}
