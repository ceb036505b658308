//! Observation gating for the AI
//!
//! The AI never reads live ball state. It sees the ball only through
//! snapshots, and a new snapshot is accepted at most once per reaction
//! interval - the difficulty's model of human perception latency.
//! Observations arriving while the gate is closed are queued and drained
//! once per tick, highest priority first.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::ai::predict::predict_intercept;
use crate::config::{AiProfile, Geometry};
use crate::consts::DEDUP_WINDOW_MS;
use crate::sim::Side;

/// Why an observation was offered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapshotReason {
    /// Ball left the opposing paddle heading toward the AI
    PaddleHit,
    /// Ball crossed the mid-zone boundary heading toward the AI
    ZoneCross,
    /// Serve launched
    ServeStart,
}

impl SnapshotReason {
    /// Higher wins when the gate opens with several observations queued
    fn priority(self) -> u8 {
        match self {
            SnapshotReason::PaddleHit => 2,
            SnapshotReason::ZoneCross => 1,
            SnapshotReason::ServeStart => 0,
        }
    }

    fn index(self) -> usize {
        match self {
            SnapshotReason::PaddleHit => 0,
            SnapshotReason::ZoneCross => 1,
            SnapshotReason::ServeStart => 2,
        }
    }
}

/// A timestamped, gated observation of the ball - the AI's sole knowledge
/// of ball state between reaction intervals. Superseded, never merged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub pos: Vec2,
    pub vel: Vec2,
    pub at_ms: f64,
    pub reason: SnapshotReason,
    /// Predicted crossing of the AI's paddle plane; `None` when the
    /// observed velocity does not threaten the AI side
    pub intercept: Option<f32>,
}

/// Candidate observation waiting for the reaction gate to open
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct PendingObservation {
    reason: SnapshotReason,
    pos: Vec2,
    vel: Vec2,
    offered_ms: f64,
}

/// Rate-limits and queues observations per the difficulty's reaction time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotScheduler {
    reaction_time_ms: f64,
    min_threat_speed: f32,
    /// The AI paddle plane the predictor targets
    target_x: f32,
    last_accepted_ms: Option<f64>,
    last_offer_ms: [Option<f64>; 3],
    pending: Vec<PendingObservation>,
    latest: Option<Snapshot>,
}

impl SnapshotScheduler {
    pub fn new(profile: &AiProfile, ai_side: Side, geom: &Geometry) -> Self {
        Self {
            reaction_time_ms: profile.reaction_time_ms,
            min_threat_speed: profile.min_threat_speed,
            target_x: ai_side.sign() * geom.paddle_x,
            last_accepted_ms: None,
            last_offer_ms: [None; 3],
            pending: Vec::new(),
            latest: None,
        }
    }

    /// The snapshot the controller reads; always the most recent accepted.
    pub fn latest(&self) -> Option<&Snapshot> {
        self.latest.as_ref()
    }

    fn can_accept(&self, now_ms: f64) -> bool {
        match self.last_accepted_ms {
            None => true,
            Some(last) => now_ms - last >= self.reaction_time_ms,
        }
    }

    /// Offer a candidate observation. Dropped if it repeats a recent reason
    /// or the ball is too slow to be a real attack; accepted immediately if
    /// the reaction gate is open, queued otherwise.
    pub fn offer(
        &mut self,
        reason: SnapshotReason,
        pos: Vec2,
        vel: Vec2,
        now_ms: f64,
        geom: &Geometry,
    ) {
        if vel.length() < self.min_threat_speed {
            log::trace!("observation dropped as noise: speed {:.1}", vel.length());
            return;
        }
        if let Some(last) = self.last_offer_ms[reason.index()] {
            if now_ms - last < DEDUP_WINDOW_MS {
                return;
            }
        }
        self.last_offer_ms[reason.index()] = Some(now_ms);

        if self.can_accept(now_ms) {
            self.accept(reason, pos, vel, now_ms, geom);
        } else {
            self.pending.push(PendingObservation {
                reason,
                pos,
                vel,
                offered_ms: now_ms,
            });
        }
    }

    /// Once per tick: accept the best pending observation if the gate has
    /// opened since it was offered.
    pub fn drain(&mut self, now_ms: f64, geom: &Geometry) {
        if self.pending.is_empty() || !self.can_accept(now_ms) {
            return;
        }
        // Highest priority wins; earliest arrival breaks ties
        let best = self
            .pending
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| {
                a.reason
                    .priority()
                    .cmp(&b.reason.priority())
                    .then(b.offered_ms.total_cmp(&a.offered_ms))
            })
            .map(|(i, _)| i);
        if let Some(i) = best {
            let obs = self.pending.remove(i);
            self.accept(obs.reason, obs.pos, obs.vel, now_ms, geom);
        }
    }

    fn accept(
        &mut self,
        reason: SnapshotReason,
        pos: Vec2,
        vel: Vec2,
        now_ms: f64,
        geom: &Geometry,
    ) {
        let intercept = predict_intercept(pos, vel, self.target_x, geom);
        self.latest = Some(Snapshot {
            pos,
            vel,
            at_ms: now_ms,
            reason,
            intercept,
        });
        self.last_accepted_ms = Some(now_ms);
        // Queued observations of equal or lower priority are now superseded
        self.pending
            .retain(|p| p.reason.priority() > reason.priority());
        log::debug!(
            "snapshot accepted: {reason:?} at {now_ms:.0}ms, intercept {intercept:?}"
        );
    }

    /// The AI's own paddle returned the ball: whatever we were tracking is
    /// no longer a threat.
    pub fn clear_threat(&mut self) {
        self.latest = None;
        self.pending.clear();
    }

    /// Round boundary: drop everything, including the reaction gate, so no
    /// stale timing leaks into the next rally.
    pub fn reset_round(&mut self) {
        self.latest = None;
        self.pending.clear();
        self.last_accepted_ms = None;
        self.last_offer_ms = [None; 3];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduler() -> (SnapshotScheduler, Geometry) {
        let geom = Geometry::default();
        let profile = AiProfile {
            precision_factor: 1.0,
            reaction_time_ms: 300.0,
            position_error: 0.0,
            anticipation_range: 120.0,
            min_threat_speed: 100.0,
        };
        (SnapshotScheduler::new(&profile, Side::Right, &geom), geom)
    }

    fn toward_ai() -> Vec2 {
        Vec2::new(250.0, 40.0)
    }

    #[test]
    fn accepted_snapshots_respect_reaction_time() {
        let (mut sched, geom) = scheduler();
        let mut accepted = Vec::new();

        // Offer aggressively every 50ms, alternating reasons to dodge dedup
        for i in 0..60u32 {
            let now = i as f64 * 50.0;
            let reason = if i % 2 == 0 {
                SnapshotReason::PaddleHit
            } else {
                SnapshotReason::ZoneCross
            };
            sched.offer(reason, Vec2::ZERO, toward_ai(), now, &geom);
            sched.drain(now, &geom);
            if let Some(s) = sched.latest() {
                if accepted.last() != Some(&s.at_ms) {
                    accepted.push(s.at_ms);
                }
            }
        }

        assert!(accepted.len() > 2);
        for pair in accepted.windows(2) {
            assert!(
                pair[1] - pair[0] >= 300.0,
                "gate violated: {} -> {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn same_reason_within_window_is_deduplicated() {
        let (mut sched, geom) = scheduler();
        sched.offer(SnapshotReason::PaddleHit, Vec2::ZERO, toward_ai(), 0.0, &geom);
        let first = *sched.latest().unwrap();

        // 400ms later: same physical event, dropped entirely (not queued)
        sched.offer(
            SnapshotReason::PaddleHit,
            Vec2::new(50.0, 0.0),
            toward_ai(),
            400.0,
            &geom,
        );
        sched.drain(400.0, &geom);
        assert_eq!(sched.latest(), Some(&first));

        // Past the window it goes through once the gate is open
        sched.offer(
            SnapshotReason::PaddleHit,
            Vec2::new(50.0, 0.0),
            toward_ai(),
            600.0,
            &geom,
        );
        assert_ne!(sched.latest(), Some(&first));
    }

    #[test]
    fn pending_observation_accepted_when_gate_opens() {
        let (mut sched, geom) = scheduler();
        sched.offer(SnapshotReason::ServeStart, Vec2::ZERO, toward_ai(), 0.0, &geom);
        sched.offer(
            SnapshotReason::ZoneCross,
            Vec2::new(200.0, 10.0),
            toward_ai(),
            100.0,
            &geom,
        );
        // Gate still closed at 200ms
        sched.drain(200.0, &geom);
        assert_eq!(sched.latest().unwrap().reason, SnapshotReason::ServeStart);

        sched.drain(320.0, &geom);
        assert_eq!(sched.latest().unwrap().reason, SnapshotReason::ZoneCross);
        assert_eq!(sched.latest().unwrap().at_ms, 320.0);
    }

    #[test]
    fn higher_priority_pending_wins_and_supersedes() {
        let (mut sched, geom) = scheduler();
        sched.offer(SnapshotReason::ServeStart, Vec2::ZERO, toward_ai(), 0.0, &geom);
        sched.offer(
            SnapshotReason::ZoneCross,
            Vec2::new(200.0, 0.0),
            toward_ai(),
            50.0,
            &geom,
        );
        sched.offer(
            SnapshotReason::PaddleHit,
            Vec2::new(-290.0, 0.0),
            toward_ai(),
            100.0,
            &geom,
        );

        sched.drain(300.0, &geom);
        assert_eq!(sched.latest().unwrap().reason, SnapshotReason::PaddleHit);

        // The lower-priority zone crossing was superseded, so the next
        // drain has nothing to accept
        sched.drain(700.0, &geom);
        assert_eq!(sched.latest().unwrap().reason, SnapshotReason::PaddleHit);
    }

    #[test]
    fn slow_ball_is_discarded_as_noise() {
        let (mut sched, geom) = scheduler();
        sched.offer(
            SnapshotReason::PaddleHit,
            Vec2::ZERO,
            Vec2::new(60.0, 10.0),
            0.0,
            &geom,
        );
        assert!(sched.latest().is_none());
        assert!(sched.pending.is_empty());
    }

    #[test]
    fn round_reset_clears_gate_and_queue() {
        let (mut sched, geom) = scheduler();
        sched.offer(SnapshotReason::PaddleHit, Vec2::ZERO, toward_ai(), 0.0, &geom);
        sched.offer(
            SnapshotReason::ZoneCross,
            Vec2::ZERO,
            toward_ai(),
            100.0,
            &geom,
        );
        sched.reset_round();
        assert!(sched.latest().is_none());

        // Gate state did not leak: an immediate offer is accepted
        sched.offer(
            SnapshotReason::ZoneCross,
            Vec2::ZERO,
            toward_ai(),
            150.0,
            &geom,
        );
        assert!(sched.latest().is_some());
    }

    #[test]
    fn snapshot_away_from_ai_has_no_intercept() {
        let (mut sched, geom) = scheduler();
        sched.offer(
            SnapshotReason::ZoneCross,
            Vec2::ZERO,
            Vec2::new(-250.0, 40.0),
            0.0,
            &geom,
        );
        let snap = sched.latest().unwrap();
        assert_eq!(snap.intercept, None);
    }
}
