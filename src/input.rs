//! Direction commands and the paddle actuator
//!
//! Both the human and the AI drive their paddle through the same minimal
//! command surface: `press(direction)` / `release()`, both idempotent.
//! The actuator reads the currently held direction once per tick and
//! applies a bounded, speed-limited step. Paddle position is never
//! written directly by controller code.

use serde::{Deserialize, Serialize};

use crate::config::Geometry;

/// A held movement direction. `Up` is toward `+y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn sign(self) -> f32 {
        match self {
            Direction::Up => 1.0,
            Direction::Down => -1.0,
        }
    }
}

/// Currently held command for one paddle. Holding a new direction
/// replaces the old one, matching a key-down after a key-up.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct InputState {
    held: Option<Direction>,
}

impl InputState {
    /// Hold a direction. Pressing the already-held direction is a no-op.
    pub fn press(&mut self, direction: Direction) {
        if self.held != Some(direction) {
            self.held = Some(direction);
        }
    }

    /// Release whatever is held. Releasing with nothing held is a no-op.
    pub fn release(&mut self) {
        self.held = None;
    }

    pub fn held(&self) -> Option<Direction> {
        self.held
    }
}

/// One paddle's position along the lateral axis.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Paddle {
    pub y: f32,
}

impl Paddle {
    /// Apply the held direction for one tick, clamped to the travel bounds.
    pub fn apply(&mut self, held: Option<Direction>, geom: &Geometry, dt: f32) {
        if let Some(direction) = held {
            let travel = geom.paddle_travel();
            self.y = (self.y + direction.sign() * geom.paddle_speed * dt).clamp(-travel, travel);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;

    #[test]
    fn press_and_release_are_idempotent() {
        let mut input = InputState::default();
        assert_eq!(input.held(), None);

        input.press(Direction::Up);
        input.press(Direction::Up);
        assert_eq!(input.held(), Some(Direction::Up));

        input.press(Direction::Down);
        assert_eq!(input.held(), Some(Direction::Down));

        input.release();
        input.release();
        assert_eq!(input.held(), None);
    }

    #[test]
    fn paddle_moves_only_while_held() {
        let geom = Geometry::default();
        let mut paddle = Paddle::default();

        paddle.apply(None, &geom, SIM_DT);
        assert_eq!(paddle.y, 0.0);

        paddle.apply(Some(Direction::Up), &geom, SIM_DT);
        let expected = geom.paddle_speed * SIM_DT;
        assert!((paddle.y - expected).abs() < 1e-5);

        paddle.apply(Some(Direction::Down), &geom, SIM_DT);
        assert!(paddle.y.abs() < 1e-5);
    }

    #[test]
    fn paddle_clamps_to_travel_bounds() {
        let geom = Geometry::default();
        let travel = geom.paddle_travel();
        let mut paddle = Paddle { y: travel - 1.0 };

        for _ in 0..120 {
            paddle.apply(Some(Direction::Up), &geom, SIM_DT);
        }
        assert_eq!(paddle.y, travel);

        for _ in 0..1200 {
            paddle.apply(Some(Direction::Down), &geom, SIM_DT);
        }
        assert_eq!(paddle.y, -travel);
    }
}
