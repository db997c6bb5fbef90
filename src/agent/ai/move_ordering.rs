// Move generation and ordering for the search
//
// Moves come from the legal generator of the board crate and are scored once
// up front; the search consumes them in the order produced here.

use super::score::Depth;
use crate::game_repr::GameState;
use chess::{ChessMove, Color, MoveGen, Piece};
use smallvec::SmallVec;

/// Offset added to every ordering score so that all scores are positive
pub const SCORE_BIAS: i32 = 16384;

const TT_MOVE_BONUS: i32 = 1_000_000;
const CAPTURE_BONUS: i32 = 100_000;
const PROMOTION_BONUS: i32 = 90_000;

/// History values are kept inside `[-HISTORY_MAX, HISTORY_MAX]`
pub const HISTORY_MAX: i32 = 8192;

/// Candidate move with its ordering score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredMove {
    pub mv: ChessMove,
    pub score: i32,
}

impl ScoredMove {
    /// Ordering score without the bias, as shown in progress reports
    #[inline]
    pub fn display_score(&self) -> i32 {
        self.score - SCORE_BIAS
    }
}

pub type MoveList = SmallVec<[ScoredMove; 64]>;

/// Get material value for MVV-LVA (Most Valuable Victim - Least Valuable Attacker)
fn piece_value_for_mvv_lva(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => 100,
        Piece::Knight => 300,
        Piece::Bishop => 320,
        Piece::Rook => 500,
        Piece::Queen => 900,
        Piece::King => 10000,
    }
}

fn score_move(
    state: &GameState,
    mv: ChessMove,
    tt_move: Option<ChessMove>,
    history: Option<&HistoryTable>,
) -> i32 {
    let board = state.board();
    let mut score = SCORE_BIAS;

    if tt_move == Some(mv) {
        score += TT_MOVE_BONUS;
    }

    if state.is_capture(mv) {
        // En passant has no piece on the target square
        let victim = board.piece_on(mv.get_dest()).unwrap_or(Piece::Pawn);
        let attacker = board.piece_on(mv.get_source()).unwrap_or(Piece::Pawn);
        score += CAPTURE_BONUS + piece_value_for_mvv_lva(victim) * 10
            - piece_value_for_mvv_lva(attacker) / 10;
    }

    if let Some(piece) = mv.get_promotion() {
        score += PROMOTION_BONUS + piece_value_for_mvv_lva(piece);
    }

    if let Some(history) = history.filter(|_| !state.is_tactical(mv)) {
        score += history.get(board.side_to_move(), mv);
    }

    score
}

fn sort_descending(moves: &mut MoveList) {
    // sort_by is stable: equal scores keep generation order
    moves.sort_by(|a, b| b.score.cmp(&a.score));
}

/// All legal moves, best first.
///
/// The move stored in the transposition table goes first, then captures by
/// MVV-LVA, promotions, and quiet moves ordered by history.
pub fn generate_moves(
    state: &GameState,
    tt_move: Option<ChessMove>,
    history: &HistoryTable,
) -> MoveList {
    let mut moves: MoveList = MoveGen::new_legal(state.board())
        .map(|mv| ScoredMove {
            mv,
            score: score_move(state, mv, tt_move, Some(history)),
        })
        .collect();

    sort_descending(&mut moves);
    moves
}

/// Captures, en passant and promotions only, best first
pub fn generate_captures(state: &GameState) -> MoveList {
    let mut moves: MoveList = MoveGen::new_legal(state.board())
        .filter(|&mv| state.is_tactical(mv))
        .map(|mv| ScoredMove {
            mv,
            score: score_move(state, mv, None, None),
        })
        .collect();

    sort_descending(&mut moves);
    moves
}

/// History heuristic keyed by (side to move, from square, to square)
#[derive(Clone)]
pub struct HistoryTable {
    table: [[[i32; 64]; 64]; 2],
}

impl HistoryTable {
    const EMPTY: HistoryTable = HistoryTable {
        table: [[[0; 64]; 64]; 2],
    };

    pub fn new() -> Self {
        Self::EMPTY
    }

    #[inline]
    pub fn get(&self, side: Color, mv: ChessMove) -> i32 {
        self.table[side.to_index()][mv.get_source().to_index()][mv.get_dest().to_index()]
    }

    /// Reward a quiet move that caused a beta cutoff at `depth`
    pub fn update(&mut self, side: Color, mv: ChessMove, depth: Depth) {
        let bonus = (depth * depth).min(HISTORY_MAX);
        let entry =
            &mut self.table[side.to_index()][mv.get_source().to_index()][mv.get_dest().to_index()];

        // Gravity: the closer to the cap, the smaller the step
        *entry += bonus - *entry * bonus / HISTORY_MAX;
    }

    /// Halve every value so that older cutoffs weigh less
    pub fn age(&mut self) {
        self.table
            .iter_mut()
            .flatten()
            .flatten()
            .for_each(|value| *value /= 2);
    }

    pub fn clear(&mut self) {
        *self = Self::EMPTY;
    }
}

impl Default for HistoryTable {
    fn default() -> Self {
        Self::new()
    }
}
