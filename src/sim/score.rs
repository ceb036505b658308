//! Score tracking and the win condition
//!
//! Mutated exclusively by the tick loop's goal handling. Once a winner is
//! set the board is frozen; further awards are ignored until an explicit
//! reset.

use serde::{Deserialize, Serialize};

use crate::sim::Side;

/// What an award call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AwardOutcome {
    /// Score incremented, match continues
    Scored,
    /// Score incremented and reached `max_score`; the match is over
    Won(Side),
    /// Board is frozen (winner already decided), nothing changed
    Ignored,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreBoard {
    left: u8,
    right: u8,
    max_score: u8,
    winner: Option<Side>,
}

impl ScoreBoard {
    pub fn new(max_score: u8) -> Self {
        Self {
            left: 0,
            right: 0,
            max_score,
            winner: None,
        }
    }

    pub fn left(&self) -> u8 {
        self.left
    }

    pub fn right(&self) -> u8 {
        self.right
    }

    pub fn max_score(&self) -> u8 {
        self.max_score
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    /// Award a point. Increments by exactly one, decides the winner when
    /// `max_score` is reached, and refuses to mutate a decided board.
    pub fn award(&mut self, side: Side) -> AwardOutcome {
        if self.winner.is_some() {
            return AwardOutcome::Ignored;
        }
        let score = match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        };
        *score += 1;
        if *score >= self.max_score {
            self.winner = Some(side);
            AwardOutcome::Won(side)
        } else {
            AwardOutcome::Scored
        }
    }

    /// Clear scores and winner for a new game.
    pub fn reset(&mut self) {
        self.left = 0;
        self.right = 0;
        self.winner = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn award_increments_by_exactly_one() {
        let mut board = ScoreBoard::new(5);
        assert_eq!(board.award(Side::Left), AwardOutcome::Scored);
        assert_eq!(board.left(), 1);
        assert_eq!(board.right(), 0);
        assert_eq!(board.award(Side::Right), AwardOutcome::Scored);
        assert_eq!(board.right(), 1);
    }

    #[test]
    fn reaching_max_score_sets_winner_and_freezes() {
        let mut board = ScoreBoard::new(3);
        board.award(Side::Right);
        board.award(Side::Right);
        assert_eq!(board.winner(), None);
        assert_eq!(board.award(Side::Right), AwardOutcome::Won(Side::Right));
        assert_eq!(board.winner(), Some(Side::Right));

        // Frozen: neither side can change the board now
        assert_eq!(board.award(Side::Left), AwardOutcome::Ignored);
        assert_eq!(board.award(Side::Right), AwardOutcome::Ignored);
        assert_eq!(board.left(), 0);
        assert_eq!(board.right(), 3);
    }

    #[test]
    fn reset_clears_scores_and_winner() {
        let mut board = ScoreBoard::new(1);
        board.award(Side::Left);
        assert_eq!(board.winner(), Some(Side::Left));

        board.reset();
        assert_eq!(board.left(), 0);
        assert_eq!(board.right(), 0);
        assert_eq!(board.winner(), None);
        assert_eq!(board.award(Side::Right), AwardOutcome::Won(Side::Right));
    }
}
