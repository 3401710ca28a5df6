//! Tracking tools: participant state through swaps.

pub mod state_track;

pub use state_track::{Operation, OperationKind, StateTrackParams, StateTrackTool};
