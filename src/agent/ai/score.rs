// Score and depth conventions shared by the search modules
//
// Scores are negamax scores: positive is good for the side to move.
// Forced mates live in the band (MATE_VALUE, MATE_SCORE] and encode their
// distance from the root, so shorter mates always compare better.

use std::fmt;

pub type Score = i32;
pub type Depth = i32;

/// Deepest ply the search can reach; sizes the PV table
pub const MAX_PLY: usize = 128;

/// Bound outside every reachable score
pub const INFINITY: Score = 32_000;

/// Score of delivering mate on the current move
pub const MATE_SCORE: Score = 30_000;

/// Lower edge of the mate band
pub const MATE_VALUE: Score = MATE_SCORE - MAX_PLY as Score;

/// Placeholder for "no static evaluation cached"
pub const EVAL_NONE: Score = -INFINITY;

#[inline]
pub fn mate_in(ply: usize) -> Score {
    MATE_SCORE - ply as Score
}

#[inline]
pub fn mated_in(ply: usize) -> Score {
    -MATE_SCORE + ply as Score
}

#[inline]
pub fn is_mate_score(score: Score) -> bool {
    score.abs() > MATE_VALUE && score.abs() <= MATE_SCORE
}

/// Full moves until mate, negative when the side to move is getting mated.
pub fn mate_distance(score: Score) -> Option<i32> {
    if !is_mate_score(score) {
        return None;
    }

    if score > 0 {
        Some((MATE_SCORE - score + 1) / 2)
    } else {
        Some(-(MATE_SCORE + score + 1) / 2)
    }
}

/// Score as shown on an `info` line: `cp C` or `mate M`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreReport {
    Centipawns(Score),
    Mate(i32),
}

impl From<Score> for ScoreReport {
    fn from(score: Score) -> Self {
        match mate_distance(score) {
            Some(moves) => ScoreReport::Mate(moves),
            None => ScoreReport::Centipawns(score),
        }
    }
}

impl fmt::Display for ScoreReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreReport::Centipawns(cp) => write!(f, "cp {}", cp),
            ScoreReport::Mate(moves) => write!(f, "mate {}", moves),
        }
    }
}
