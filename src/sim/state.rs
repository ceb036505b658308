//! Game state and core simulation types
//!
//! All state that must be persisted for determinism lives here. Each field
//! has exactly one writer: the ball is mutated only inside the per-tick
//! physics step, paddles only by the actuator, scores only by the
//! scoreboard.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::ai::{AiController, SnapshotScheduler};
use crate::config::{AiProfile, GameConfig};
use crate::consts::SERVE_DELAY_TICKS;
use crate::error::SetupError;
use crate::input::{Direction, InputState, Paddle};
use crate::sim::score::ScoreBoard;

/// Which end of the arena a paddle defends. `Left` is `-x`, `Right` is `+x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Sign of this side's x coordinate
    pub fn sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball frozen, serve timer pending
    AwaitingServe,
    /// Active rally
    Playing,
    /// Match decided; gameplay state is frozen until an explicit reset
    GameOver,
}

/// The ball. Position and velocity are owned by the physics step;
/// nothing else writes them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    /// False while frozen between a goal and the next serve
    pub live: bool,
}

impl Ball {
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    fn parked() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            live: false,
        }
    }
}

/// A deferred action guarded by a generation counter. Firing is a no-op
/// once the generation has moved on, which is how a reset cancels a
/// pending serve without a race.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Deferred<T> {
    pub fire_at_tick: u64,
    pub generation: u32,
    pub payload: T,
}

/// Complete match state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: GameConfig,
    /// Seeded RNG; consumed only for serve angles and AI aim error
    pub(crate) rng: Pcg32,
    /// Simulation tick counter, the only clock in the core
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub ball: Ball,
    pub(crate) paddles: [Paddle; 2],
    pub(crate) inputs: [InputState; 2],
    pub score: ScoreBoard,
    pub scheduler: SnapshotScheduler,
    pub ai: AiController,
    /// Pending serve, if any; its payload is the side served toward
    pub(crate) serve_timer: Option<Deferred<Side>>,
    /// Bumped on every reset; stale deferred actions check against it
    pub(crate) generation: u32,
    pub(crate) match_start_tick: u64,
}

impl GameState {
    /// Build a match from a validated configuration.
    pub fn new(config: GameConfig) -> Result<Self, SetupError> {
        config.geometry.validate()?;
        if config.max_score == 0 {
            return Err(SetupError::InvalidMaxScore);
        }

        let profile = AiProfile::for_difficulty(config.difficulty);
        let ai = AiController::new(config.ai_side, profile)?;
        let scheduler = SnapshotScheduler::new(&profile, config.ai_side, &config.geometry);

        let mut state = Self {
            config,
            rng: Pcg32::seed_from_u64(config.seed),
            time_ticks: 0,
            phase: GamePhase::AwaitingServe,
            ball: Ball::parked(),
            paddles: [Paddle::default(); 2],
            inputs: [InputState::default(); 2],
            score: ScoreBoard::new(config.max_score),
            scheduler,
            ai,
            serve_timer: None,
            generation: 0,
            match_start_tick: 0,
        };

        let toward = config
            .first_serve_toward
            .unwrap_or(config.ai_side.opponent());
        state.schedule_serve(toward);
        log::info!(
            "match ready: difficulty {}, AI on {:?}, first serve toward {:?}",
            config.difficulty.as_str(),
            config.ai_side,
            toward
        );
        Ok(state)
    }

    /// Logical time in milliseconds, derived from the tick counter.
    pub fn now_ms(&self) -> f64 {
        self.time_ticks as f64 * crate::consts::SIM_DT as f64 * 1000.0
    }

    /// Milliseconds elapsed since the current match started.
    pub fn match_elapsed_ms(&self) -> f64 {
        (self.time_ticks - self.match_start_tick) as f64 * crate::consts::SIM_DT as f64 * 1000.0
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        &self.paddles[side.index()]
    }

    /// Hold a direction for one side's paddle. The human input collaborator
    /// maps key-down events here; the AI calls the same surface internally.
    pub fn press(&mut self, side: Side, direction: Direction) {
        self.inputs[side.index()].press(direction);
    }

    /// Release a side's held direction (key-up).
    pub fn release(&mut self, side: Side) {
        self.inputs[side.index()].release();
    }

    /// Enable or disable the AI. Disabling releases its held direction and
    /// clears tracking immediately, leaving the match playable as
    /// human-vs-human.
    pub fn set_ai_enabled(&mut self, enabled: bool) {
        let idx = self.ai.side().index();
        self.ai.set_enabled(enabled, &mut self.inputs[idx]);
        if !enabled {
            self.scheduler.clear_threat();
        }
    }

    /// Start a new game: clear scores and winner, cancel any pending serve,
    /// flush observation state, and schedule a fresh serve.
    pub fn reset(&mut self, sink: &mut dyn crate::events::EventSink) {
        self.generation = self.generation.wrapping_add(1);
        self.serve_timer = None;
        self.ball = Ball::parked();
        self.score.reset();
        self.scheduler.reset_round();
        for input in &mut self.inputs {
            input.release();
        }
        self.ai.round_reset();
        self.phase = GamePhase::AwaitingServe;
        self.match_start_tick = self.time_ticks;

        let toward = self
            .config
            .first_serve_toward
            .unwrap_or(self.config.ai_side.opponent());
        self.schedule_serve(toward);
        sink.notify(&crate::events::GameEvent::Reset);
        log::info!("match reset");
    }

    /// Queue a serve toward `toward` after the standard delay.
    pub(crate) fn schedule_serve(&mut self, toward: Side) {
        self.serve_timer = Some(Deferred {
            fire_at_tick: self.time_ticks + SERVE_DELAY_TICKS,
            generation: self.generation,
            payload: toward,
        });
        self.phase = GamePhase::AwaitingServe;
    }
}
