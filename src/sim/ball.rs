//! Ball physics: integration, collision resolution, goal detection
//!
//! One frame-locked step per tick. Wall and paddle collisions in the same
//! tick are resolved independently (a corner hit applies both). Collision
//! tests snap the ball just inside the surface with a small margin so a
//! grazing contact can never tunnel or re-trigger.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::Geometry;
use crate::consts::COLLISION_EPS;
use crate::events::WallSide;
use crate::input::Paddle;
use crate::sim::state::{Ball, Side};

/// Physics outcomes of one ball step, in the order they occurred.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BallEvent {
    WallBounce {
        side: WallSide,
    },
    /// Primary trigger for AI observation: carries the post-collision state
    PaddleHit {
        side: Side,
        pos: Vec2,
        vel: Vec2,
    },
    Goal {
        scorer: Side,
    },
}

/// Advance the ball by one fixed step and resolve collisions.
///
/// No-op while the ball is frozen awaiting a serve. Goal detection freezes
/// the ball, so a crossing produces exactly one `Goal` event even if the
/// caller keeps ticking.
pub fn step(
    ball: &mut Ball,
    paddles: &[Paddle; 2],
    geom: &Geometry,
    dt: f32,
    events: &mut Vec<BallEvent>,
) {
    if !ball.live {
        return;
    }

    ball.pos += ball.vel * dt;

    // Walls: reflect when the leading edge crosses while moving toward it,
    // then clamp to just inside so the ball can't tunnel.
    if ball.pos.y + geom.ball_radius >= geom.wall_y && ball.vel.y > 0.0 {
        ball.vel.y = -ball.vel.y;
        ball.pos.y = geom.wall_y - geom.ball_radius - COLLISION_EPS;
        events.push(BallEvent::WallBounce {
            side: WallSide::Top,
        });
    } else if ball.pos.y - geom.ball_radius <= -geom.wall_y && ball.vel.y < 0.0 {
        ball.vel.y = -ball.vel.y;
        ball.pos.y = -geom.wall_y + geom.ball_radius + COLLISION_EPS;
        events.push(BallEvent::WallBounce {
            side: WallSide::Bottom,
        });
    }

    // Paddles: recognized only while moving toward that paddle and within
    // depth/height tolerance of its face.
    for side in [Side::Left, Side::Right] {
        if ball.vel.x * side.sign() <= 0.0 {
            continue;
        }
        let face_x = side.sign() * geom.paddle_x;
        let paddle = &paddles[side.index()];
        let within_depth =
            (ball.pos.x - face_x).abs() <= geom.paddle_half_thickness + geom.ball_radius;
        let within_height =
            (ball.pos.y - paddle.y).abs() <= geom.paddle_half_height + geom.ball_radius;
        if !(within_depth && within_height) {
            continue;
        }

        let speed = ball.speed();
        // Hit position along the paddle, normalized by half-height
        let offset = ((ball.pos.y - paddle.y) / geom.paddle_half_height).clamp(-1.0, 1.0);
        ball.vel.x = -ball.vel.x;
        ball.vel.y = speed * geom.max_deflection * offset;

        // Speed progression: geometric rescale of the whole velocity vector
        let new_speed = (speed + geom.speed_increment).min(geom.ball_max_speed);
        ball.vel = ball.vel.normalize_or_zero() * new_speed;

        // Snap in front of the paddle face
        ball.pos.x =
            face_x - side.sign() * (geom.paddle_half_thickness + geom.ball_radius + COLLISION_EPS);

        events.push(BallEvent::PaddleHit {
            side,
            pos: ball.pos,
            vel: ball.vel,
        });
    }

    // Scoring: a paddle at +x concedes when the ball passes +out_of_bounds_x
    if ball.pos.x > geom.out_of_bounds_x {
        ball.live = false;
        events.push(BallEvent::Goal {
            scorer: Side::Left,
        });
    } else if ball.pos.x < -geom.out_of_bounds_x {
        ball.live = false;
        events.push(BallEvent::Goal {
            scorer: Side::Right,
        });
    }
}
