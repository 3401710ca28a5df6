//! Counting tools: category-based object counting.

pub mod categories;
pub mod object_count;

pub use categories::{CategoryLoadError, CategoryTable};
pub use object_count::{ObjectCountParams, ObjectCountTool};
