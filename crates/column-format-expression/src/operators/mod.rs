//! Operator implementations used by the evaluator.

pub mod arithmetic;
pub mod branching;
pub mod comparison;
pub mod string;
