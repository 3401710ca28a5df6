//! Protocol tools: reasoning checklist and answer format validation.

pub mod format_validate;
pub mod systematic_verify;

pub use format_validate::{FormatValidateParams, FormatValidateTool};
pub use systematic_verify::{ProblemType, SystematicVerifyParams, SystematicVerifyTool};
