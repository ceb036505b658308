//! Fixed timestep simulation tick
//!
//! Advances the match deterministically. Components run in a fixed order
//! each tick - ball physics, scoring, observation drain, AI control, paddle
//! actuation - and no component is re-entered mid-tick. The AI therefore
//! never acts on an observation newer than this tick's drain.

use glam::Vec2;

use crate::ai::SnapshotReason;
use crate::events::{EventSink, GameEvent, MatchReport};
use crate::sim::ball::{self, BallEvent};
use crate::sim::score::AwardOutcome;
use crate::sim::state::{Ball, GamePhase, GameState, Side};

/// Advance the game state by one fixed timestep.
///
/// `dt` is the frame-locked step (pass [`consts::SIM_DT`](crate::consts::SIM_DT));
/// integration is per-frame, not wall-clock scaled. Notifications go to
/// `sink` in the order they occur.
pub fn tick(state: &mut GameState, sink: &mut dyn EventSink, dt: f32) {
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.time_ticks += 1;
    let now = state.now_ms();
    let geom = state.config.geometry;

    // Deferred serve: fire only if its generation is still current. A timer
    // from before a reset is a stale action and must never mutate state.
    if let Some(timer) = state.serve_timer {
        if timer.generation != state.generation {
            state.serve_timer = None;
        } else if state.time_ticks >= timer.fire_at_tick {
            state.serve_timer = None;
            launch_serve(state, timer.payload, now, sink);
        }
    }

    // 1. Ball physics and scoring
    if state.phase == GamePhase::Playing {
        let prev_x = state.ball.pos.x;
        let mut ball_events = Vec::new();
        ball::step(&mut state.ball, &state.paddles, &geom, dt, &mut ball_events);

        // Mid-zone crossing toward the AI is an observation trigger
        let toward_ai = state.ai.side().sign();
        if state.ball.live
            && state.ball.vel.x * toward_ai > 0.0
            && prev_x * toward_ai < geom.zone_x
            && state.ball.pos.x * toward_ai >= geom.zone_x
        {
            state.scheduler.offer(
                SnapshotReason::ZoneCross,
                state.ball.pos,
                state.ball.vel,
                now,
                &geom,
            );
        }

        for event in ball_events {
            match event {
                BallEvent::WallBounce { side } => {
                    sink.notify(&GameEvent::WallBounce { side });
                }
                BallEvent::PaddleHit { side, pos, vel } => {
                    sink.notify(&GameEvent::PaddleHit { side });
                    if side == state.ai.side() {
                        // Our own return: the tracked threat is gone
                        state.scheduler.clear_threat();
                    } else {
                        state
                            .scheduler
                            .offer(SnapshotReason::PaddleHit, pos, vel, now, &geom);
                    }
                }
                BallEvent::Goal { scorer } => handle_goal(state, scorer, sink),
            }
        }
    }

    // 2. Open the observation gate for anything queued
    state.scheduler.drain(now, &geom);

    // 3. AI control from the latest accepted snapshot
    let snapshot = state.scheduler.latest().copied();
    let ai_idx = state.ai.side().index();
    let ai_paddle_y = state.paddles[ai_idx].y;
    state.ai.update(
        snapshot.as_ref(),
        ai_paddle_y,
        &mut state.inputs[ai_idx],
        &mut state.rng,
        now,
        &geom,
    );

    // 4. Actuate both paddles from their held directions
    for i in 0..2 {
        let held = state.inputs[i].held();
        state.paddles[i].apply(held, &geom, dt);
    }
}

/// Launch the ball from center toward `toward`, with a random lateral
/// component, at exactly the serve speed.
fn launch_serve(state: &mut GameState, toward: Side, now: f64, sink: &mut dyn EventSink) {
    use rand::Rng;

    let geom = state.config.geometry;
    let speed = geom.ball_start_speed;
    let vy = state.rng.random_range(-0.35..=0.35f32) * speed;
    let vx = toward.sign() * (speed * speed - vy * vy).sqrt();

    state.ball = Ball {
        pos: Vec2::ZERO,
        vel: Vec2::new(vx, vy),
        live: true,
    };
    state.phase = GamePhase::Playing;
    sink.notify(&GameEvent::Serve { toward });
    state.scheduler.offer(
        SnapshotReason::ServeStart,
        state.ball.pos,
        state.ball.vel,
        now,
        &geom,
    );
    log::debug!("serve toward {toward:?} with velocity {:?}", state.ball.vel);
}

fn handle_goal(state: &mut GameState, scorer: Side, sink: &mut dyn EventSink) {
    match state.score.award(scorer) {
        AwardOutcome::Scored => {
            sink.notify(&GameEvent::ScoreChanged {
                left: state.score.left(),
                right: state.score.right(),
            });
            log::info!(
                "{:?} scores: {} - {}",
                scorer,
                state.score.left(),
                state.score.right()
            );

            // Round reset: flush observation state and held AI input so no
            // stale reaction timing leaks into the next rally, then serve
            // toward the side that conceded.
            state.scheduler.reset_round();
            state.inputs[state.ai.side().index()].release();
            state.ai.round_reset();
            state.schedule_serve(scorer.opponent());
        }
        AwardOutcome::Won(winner) => {
            sink.notify(&GameEvent::ScoreChanged {
                left: state.score.left(),
                right: state.score.right(),
            });
            let report = MatchReport {
                score_left: state.score.left(),
                score_right: state.score.right(),
                winner,
                duration_ms: state.match_elapsed_ms(),
            };
            sink.notify(&GameEvent::Won { report });
            log::info!(
                "{:?} wins {} - {} after {:.1}s",
                winner,
                report.score_left,
                report.score_right,
                report.duration_ms / 1000.0
            );

            state.phase = GamePhase::GameOver;
            state.serve_timer = None;
            state.scheduler.reset_round();
            for input in &mut state.inputs {
                input.release();
            }
            state.ai.round_reset();
        }
        AwardOutcome::Ignored => {}
    }
}
