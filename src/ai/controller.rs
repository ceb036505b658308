//! The AI paddle controller
//!
//! Consumes the latest accepted snapshot, derives a target from the
//! predicted intercept plus difficulty-shaped error, and drives the paddle
//! through the same press/release surface the human uses. Hysteresis and a
//! minimum key-change interval keep noisy predictions from turning into
//! paddle jitter.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::ai::snapshot::Snapshot;
use crate::config::{AiProfile, Geometry};
use crate::consts::TOLERANCE_BAND;
use crate::error::SetupError;
use crate::input::{Direction, InputState};
use crate::sim::Side;

/// What the controller is currently doing while active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiMode {
    /// No live threat: hold the center of the paddle zone
    Defensive,
    /// Tracking a predicted intercept from the latest snapshot
    Interception,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiController {
    side: Side,
    profile: AiProfile,
    enabled: bool,
    mode: AiMode,
    /// Logical time of the last direction change, for the key-change gate
    last_change_ms: Option<f64>,
}

impl AiController {
    /// Validates the profile up front; a broken profile is an integration
    /// mistake, not something to limp along with.
    pub fn new(side: Side, profile: AiProfile) -> Result<Self, SetupError> {
        profile.validate()?;
        Ok(Self {
            side,
            profile,
            enabled: true,
            mode: AiMode::Defensive,
            last_change_ms: None,
        })
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn profile(&self) -> &AiProfile {
        &self.profile
    }

    pub fn mode(&self) -> AiMode {
        self.mode
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Deactivating releases the held direction immediately and clears
    /// tracking state.
    pub fn set_enabled(&mut self, enabled: bool, input: &mut InputState) {
        if !enabled {
            input.release();
            self.mode = AiMode::Defensive;
            self.last_change_ms = None;
        }
        self.enabled = enabled;
    }

    /// Round boundary: forget direction-change timing from the last rally.
    pub fn round_reset(&mut self) {
        self.mode = AiMode::Defensive;
        self.last_change_ms = None;
    }

    /// One control step. Reads the latest snapshot (never live ball state),
    /// picks a target, and holds/releases a direction on the shared input.
    pub fn update(
        &mut self,
        snapshot: Option<&Snapshot>,
        paddle_y: f32,
        input: &mut InputState,
        rng: &mut Pcg32,
        now_ms: f64,
        geom: &Geometry,
    ) {
        if !self.enabled {
            return;
        }

        // A snapshot only drives interception while it still says the ball
        // is coming at us and produced a usable intercept.
        let incoming = snapshot
            .filter(|s| s.vel.x * self.side.sign() > 0.0)
            .and_then(|s| s.intercept);

        let target = match incoming {
            Some(intercept) => {
                self.mode = AiMode::Interception;
                aim_target(&self.profile, intercept, geom.paddle_travel(), rng)
            }
            None => {
                self.mode = AiMode::Defensive;
                0.0
            }
        };

        let distance = target - paddle_y;
        if distance.abs() < TOLERANCE_BAND {
            input.release();
            return;
        }

        let desired = if distance > 0.0 {
            Direction::Up
        } else {
            Direction::Down
        };

        if input.held() == Some(desired) {
            return;
        }

        // Hysteresis: a reversal on a large distance is prediction noise,
        // not a real course change - skip it this tick.
        if input.held().is_some() && distance.abs() > self.profile.anticipation_range / 3.0 {
            return;
        }

        // Direction changes are rate-limited like real key presses
        if let Some(last) = self.last_change_ms {
            if now_ms - last < self.profile.key_change_interval_ms() {
                return;
            }
        }

        input.release();
        input.press(desired);
        self.last_change_ms = Some(now_ms);
    }
}

/// Derive the aimed target from a predicted intercept: uniform position
/// error, clamp to the reachable band, then scale by the precision factor
/// (values below 1 bias the aim toward the arena center).
fn aim_target(profile: &AiProfile, intercept: f32, travel: f32, rng: &mut Pcg32) -> f32 {
    let error = if profile.position_error > 0.0 {
        rng.random_range(-profile.position_error..=profile.position_error)
    } else {
        0.0
    };
    (intercept + error).clamp(-travel, travel) * profile.precision_factor
}
