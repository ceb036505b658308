//! The autonomous opponent
//!
//! Three layers, leaves first:
//! - `predict`: pure analytic intercept prediction (no randomness)
//! - `snapshot`: reaction-time gating of ball observations
//! - `controller`: target selection, error injection, direction commands
//!
//! The controller only ever sees gated snapshots, so its knowledge of the
//! ball is as stale as the difficulty's reaction time says it should be.

pub mod controller;
pub mod predict;
pub mod snapshot;

pub use controller::{AiController, AiMode};
pub use predict::predict_intercept;
pub use snapshot::{Snapshot, SnapshotReason, SnapshotScheduler};
