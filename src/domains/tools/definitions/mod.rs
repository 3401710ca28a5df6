//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file, grouped by problem family.

pub mod common;
pub mod counting;
pub mod logic;
pub mod protocol;
pub mod temporal;
pub mod tracking;

pub use counting::{CategoryTable, ObjectCountParams, ObjectCountTool};
pub use logic::{BooleanEvaluateParams, BooleanEvaluateTool};
pub use protocol::{
    FormatValidateParams, FormatValidateTool, ProblemType, SystematicVerifyParams,
    SystematicVerifyTool,
};
pub use temporal::{DateCalculateParams, DateCalculateTool};
pub use tracking::{StateTrackParams, StateTrackTool};
