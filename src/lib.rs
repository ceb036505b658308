//! Pong Core - deterministic paddle-and-ball simulation with a predictive AI
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, scoring, game state, tick loop)
//! - `ai`: Trajectory prediction, observation scheduling, paddle controller
//! - `input`: Direction commands and the paddle actuator
//! - `config`: Geometry, difficulty profiles, match configuration
//! - `events`: Typed notifications for external observers (render, reporting)
//!
//! The simulation is pure and deterministic: fixed timestep, seeded RNG,
//! no wall-clock reads, no rendering or platform dependencies. Human and AI
//! input both go through the same `press`/`release` command surface.

pub mod ai;
pub mod config;
pub mod error;
pub mod events;
pub mod input;
pub mod sim;

pub use config::{AiProfile, Difficulty, GameConfig, Geometry};
pub use error::SetupError;
pub use events::{EventSink, GameEvent, MatchReport};
pub use input::Direction;
pub use sim::{GamePhase, GameState, Side, tick};

/// Game timing constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, frame-locked like the physics)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Delay between a goal and the next serve, in ticks (1 second)
    pub const SERVE_DELAY_TICKS: u64 = 60;

    /// Margin used when snapping the ball out of a wall or paddle after a
    /// collision, so the next tick's test never re-triggers on the boundary
    pub const COLLISION_EPS: f32 = 0.01;

    /// Dead band around the AI's target where it releases its held direction
    pub const TOLERANCE_BAND: f32 = 15.0;

    /// Window within which repeated observations with the same reason are
    /// treated as duplicates of one physical event
    pub const DEDUP_WINDOW_MS: f64 = 500.0;

    /// Cap on analytic wall reflections per intercept prediction
    pub const MAX_REFLECTIONS: u32 = 20;

    /// Lateral velocity below this is treated as "no reflection will happen"
    pub const PREDICT_EPS: f32 = 1e-3;
}
