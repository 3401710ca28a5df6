//! Logic tools: boolean expression evaluation.

pub mod boolean_evaluate;
pub mod expr;

pub use boolean_evaluate::{BooleanEvaluateParams, BooleanEvaluateTool};
