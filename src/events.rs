//! Typed notifications for external observers
//!
//! The core never holds onto UI objects. Render/VFX, sound, and result
//! reporting all subscribe through [`EventSink`], which is handed to
//! [`tick`](crate::sim::tick) by reference each frame. Sinks are purely
//! observational and cannot mutate core state.

use serde::{Deserialize, Serialize};

use crate::sim::Side;

/// Which wall the ball bounced off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallSide {
    Top,
    Bottom,
}

/// Final match record handed to the result-reporting collaborator.
/// Delivery and persistence are entirely external.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub score_left: u8,
    pub score_right: u8,
    pub winner: Side,
    /// Logical match duration (ticks scaled by the fixed timestep)
    pub duration_ms: f64,
}

/// Notifications emitted by the simulation, in tick order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball launched toward a side after a goal or at round start
    Serve { toward: Side },
    /// Ball reflected off the top or bottom wall
    WallBounce { side: WallSide },
    /// Ball returned by a paddle
    PaddleHit { side: Side },
    /// A side scored
    ScoreChanged { left: u8, right: u8 },
    /// Match over; no further gameplay state changes until reset
    Won { report: MatchReport },
    /// Explicit new-game reset
    Reset,
}

/// Observer interface for game notifications.
pub trait EventSink {
    fn notify(&mut self, event: &GameEvent);
}

/// Collect events into a vector; the natural sink for tests and for
/// embedders that drain notifications after each tick.
impl EventSink for Vec<GameEvent> {
    fn notify(&mut self, event: &GameEvent) {
        self.push(event.clone());
    }
}

/// Discard all notifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn notify(&mut self, _event: &GameEvent) {}
}
