//! Match configuration: arena geometry, difficulty levels, AI profiles
//!
//! Everything here is constructed once at setup and read-only afterwards.
//! The numeric values are tuning parameters, not contracts - behavior is
//! validated through relative properties (harder AI tracks closer, reacts
//! faster), not through these exact constants.

use serde::{Deserialize, Serialize};

use crate::error::SetupError;
use crate::sim::Side;

/// Arena and ball geometry. All distances in world units, speeds in
/// units per second.
///
/// The play plane is (x, y): x runs between the paddles, y is the lateral
/// axis bounded by the walls.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Geometry {
    /// Walls at `y = +-wall_y`
    pub wall_y: f32,
    /// Paddle faces at `x = +-paddle_x`
    pub paddle_x: f32,
    /// A goal is scored once the ball passes `x = +-out_of_bounds_x`
    pub out_of_bounds_x: f32,
    /// Mid-zone boundary at `x = +-zone_x`; crossing it toward the AI side
    /// is an observation trigger
    pub zone_x: f32,
    /// Half the paddle height (along y)
    pub paddle_half_height: f32,
    /// Half the paddle depth (along x)
    pub paddle_half_thickness: f32,
    /// Paddle travel speed while a direction is held
    pub paddle_speed: f32,
    /// Ball radius, used only as a collision threshold
    pub ball_radius: f32,
    /// Serve speed; ball speed never drops below this while in play
    pub ball_start_speed: f32,
    /// Hard cap on ball speed
    pub ball_max_speed: f32,
    /// Speed added on each paddle hit (up to the cap)
    pub speed_increment: f32,
    /// Fraction of ball speed converted to lateral deflection at the
    /// paddle edge (hit dead center deflects nothing)
    pub max_deflection: f32,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            wall_y: 170.0,
            paddle_x: 300.0,
            out_of_bounds_x: 350.0,
            zone_x: 200.0,
            paddle_half_height: 30.0,
            paddle_half_thickness: 10.0,
            paddle_speed: 240.0,
            ball_radius: 8.0,
            ball_start_speed: 200.0,
            ball_max_speed: 400.0,
            speed_increment: 25.0,
            max_deflection: 0.25,
        }
    }
}

impl Geometry {
    /// How far a paddle center may travel from the midline
    pub fn paddle_travel(&self) -> f32 {
        self.wall_y - self.paddle_half_height
    }

    /// Fail fast on degenerate geometry rather than clamping silently.
    pub fn validate(&self) -> Result<(), SetupError> {
        let fields = [
            self.wall_y,
            self.paddle_x,
            self.out_of_bounds_x,
            self.zone_x,
            self.paddle_half_height,
            self.paddle_half_thickness,
            self.paddle_speed,
            self.ball_radius,
            self.ball_start_speed,
            self.ball_max_speed,
            self.speed_increment,
            self.max_deflection,
        ];
        if fields.iter().any(|v| !v.is_finite()) {
            return Err(SetupError::InvalidGeometry("non-finite constant"));
        }
        if self.wall_y <= 0.0 || self.paddle_x <= 0.0 {
            return Err(SetupError::InvalidGeometry("arena extents must be positive"));
        }
        if self.out_of_bounds_x <= self.paddle_x {
            return Err(SetupError::InvalidGeometry(
                "scoring line must lie behind the paddles",
            ));
        }
        if self.paddle_half_height <= 0.0 || self.paddle_half_height >= self.wall_y {
            return Err(SetupError::InvalidGeometry("paddle height out of range"));
        }
        if self.paddle_speed <= 0.0 {
            return Err(SetupError::InvalidGeometry("paddle_speed must be positive"));
        }
        if self.ball_start_speed <= 0.0 || self.ball_max_speed < self.ball_start_speed {
            return Err(SetupError::InvalidGeometry("ball speed bounds inverted"));
        }
        Ok(())
    }
}

/// AI difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Parse a difficulty key, falling back to Medium for unknown keys.
    /// The fallback is the documented default, not a silent substitution.
    pub fn parse_or_default(s: &str) -> Self {
        Difficulty::from_str(s).unwrap_or_else(|| {
            log::warn!("unknown difficulty {s:?}, defaulting to Medium");
            Difficulty::Medium
        })
    }
}

/// Per-difficulty AI behavior parameters, immutable after setup.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AiProfile {
    /// Multiplicative imprecision applied to the aimed target, in (0, 1].
    /// Values below 1 systematically undershoot toward the arena center.
    pub precision_factor: f32,
    /// Minimum interval between accepted ball observations
    pub reaction_time_ms: f64,
    /// Uniform aim error half-width added to the predicted intercept
    pub position_error: f32,
    /// Range within which the controller commits to a direction; also
    /// scales the hysteresis band that suppresses direction flips
    pub anticipation_range: f32,
    /// Observations of a ball slower than this are dropped as noise
    pub min_threat_speed: f32,
}

impl AiProfile {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                precision_factor: 0.85,
                reaction_time_ms: 450.0,
                position_error: 38.0,
                anticipation_range: 90.0,
                min_threat_speed: 120.0,
            },
            Difficulty::Medium => Self {
                precision_factor: 0.93,
                reaction_time_ms: 280.0,
                position_error: 20.0,
                anticipation_range: 120.0,
                min_threat_speed: 100.0,
            },
            Difficulty::Hard => Self {
                precision_factor: 0.99,
                reaction_time_ms: 140.0,
                position_error: 6.0,
                anticipation_range: 160.0,
                min_threat_speed: 80.0,
            },
        }
    }

    /// Minimum interval between direction changes, derived from reaction time
    pub fn key_change_interval_ms(&self) -> f64 {
        self.reaction_time_ms / 4.0
    }

    pub fn validate(&self) -> Result<(), SetupError> {
        if !(self.precision_factor > 0.0 && self.precision_factor <= 1.0) {
            return Err(SetupError::InvalidAiProfile("precision_factor not in (0, 1]"));
        }
        if !(self.reaction_time_ms > 0.0) {
            return Err(SetupError::InvalidAiProfile("reaction_time_ms must be positive"));
        }
        if !(self.position_error >= 0.0) {
            return Err(SetupError::InvalidAiProfile("position_error must be non-negative"));
        }
        if !(self.anticipation_range > 0.0) {
            return Err(SetupError::InvalidAiProfile("anticipation_range must be positive"));
        }
        if !(self.min_threat_speed >= 0.0) {
            return Err(SetupError::InvalidAiProfile("min_threat_speed must be non-negative"));
        }
        Ok(())
    }
}

/// Everything needed to construct a match. Passed in whole at setup;
/// the core does no environment or file parsing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seed for serve angles and AI aim error
    pub seed: u64,
    /// First score to reach this wins
    pub max_score: u8,
    /// AI difficulty level
    pub difficulty: Difficulty,
    /// Which paddle the AI drives
    pub ai_side: Side,
    /// First serve travels toward this side (None = toward the human)
    pub first_serve_toward: Option<Side>,
    pub geometry: Geometry,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            max_score: 5,
            difficulty: Difficulty::Medium,
            ai_side: Side::Right,
            first_serve_toward: None,
            geometry: Geometry::default(),
        }
    }
}
