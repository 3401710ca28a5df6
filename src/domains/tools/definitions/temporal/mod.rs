//! Temporal tools: calendar date arithmetic.

pub mod date_calculate;

pub use date_calculate::{DateCalculateParams, DateCalculateTool, DateFormat};
