//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Logical clock derived from the tick counter
//! - No rendering or platform dependencies

pub mod ball;
pub mod score;
pub mod state;
pub mod tick;

pub use ball::BallEvent;
pub use score::{AwardOutcome, ScoreBoard};
pub use state::{Ball, Deferred, GamePhase, GameState, Side};
pub use tick::tick;
