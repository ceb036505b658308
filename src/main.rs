//! Headless demo match
//!
//! Runs a full match between the AI and a naive ball-tracker driving the
//! human-side input surface, then prints the final match report as JSON -
//! the same record a result-reporting collaborator would receive.
//!
//! Usage: `pong-core [seed] [easy|medium|hard]`

use pong_core::consts::SIM_DT;
use pong_core::{
    Difficulty, Direction, GameConfig, GameEvent, GamePhase, GameState, Side, tick,
};

/// Safety cap: a 60 Hz match that runs an hour of logical time is stuck.
const MAX_TICKS: u64 = 60 * 60 * 60;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xC0FFEE);
    let difficulty = args
        .next()
        .map(|s| Difficulty::parse_or_default(&s))
        .unwrap_or(Difficulty::Medium);

    let config = GameConfig {
        seed,
        difficulty,
        ..GameConfig::default()
    };
    let mut state = match GameState::new(config) {
        Ok(state) => state,
        Err(err) => {
            eprintln!("setup failed: {err}");
            std::process::exit(1);
        }
    };

    log::info!("running headless match: seed {seed}, difficulty {}", difficulty.as_str());

    let mut events: Vec<GameEvent> = Vec::new();
    let mut report = None;

    for _ in 0..MAX_TICKS {
        drive_human_tracker(&mut state);
        tick(&mut state, &mut events, SIM_DT);

        for event in events.drain(..) {
            match event {
                GameEvent::ScoreChanged { left, right } => {
                    println!("score: {left} - {right}");
                }
                GameEvent::Won { report: r } => report = Some(r),
                _ => {}
            }
        }
        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    match report {
        Some(report) => {
            println!(
                "{}",
                serde_json::to_string_pretty(&report).expect("report serializes")
            );
        }
        None => {
            eprintln!("match did not finish within {MAX_TICKS} ticks");
            std::process::exit(1);
        }
    }
}

/// Stand-in for the human: follow the live ball's lateral position through
/// the same press/release surface a keyboard handler would use. No
/// prediction, no reaction delay - just a tracker.
fn drive_human_tracker(state: &mut GameState) {
    let side = Side::Left;
    if !state.ball.live || state.ball.vel.x >= 0.0 {
        state.release(side);
        return;
    }
    let delta = state.ball.pos.y - state.paddle(side).y;
    if delta.abs() < 10.0 {
        state.release(side);
    } else if delta > 0.0 {
        state.press(side, Direction::Up);
    } else {
        state.press(side, Direction::Down);
    }
}
