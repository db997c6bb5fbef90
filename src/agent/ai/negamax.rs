// Negamax Search with Alpha-Beta Pruning
//
// Negamax takes advantage of the zero-sum property of chess: max(a, b) = -min(-a, -b).
// Every node maximizes, and a child's score is negated before the parent compares it.
//
// Per node, in order:
// - cooperative poll of the communicator
// - ply overflow guard
// - draw detection and mate distance pruning (non-root)
// - quiescence search at the horizon
// - transposition table probe (move hint, fail-high/low cutoffs at non-root nodes)
// - move loop with PV and history updates
// - mate / stalemate detection and transposition table store

use super::communicator::Communicator;
use super::config::EngineConfig;
use super::evaluation::evaluate;
use super::move_ordering::{generate_moves, HistoryTable};
use super::pv::PvTable;
use super::score::{mate_in, mated_in, Depth, Score, EVAL_NONE, INFINITY, MAX_PLY};
use super::transposition_table::{TTFlags, TranspositionTable};
use crate::game_repr::GameState;
use log::trace;
use std::time::Instant;

/// The communicator is polled whenever `nodes & COMM_MASK == 0`
pub const COMM_MASK: u64 = 2047;

/// Bookkeeping of one root search
#[derive(Debug, Clone)]
pub struct SearchState {
    /// Distance from the root of the node being searched
    pub ply: usize,
    /// Moves applied so far, quiescence included
    pub nodes: u64,
    /// Deepest ply reached in the current iteration
    pub seldepth: usize,
    /// Set once the search must unwind; results from then on are discarded
    pub stopped: bool,
    /// External stop seen while the iteration had to complete
    pub stop_requested: bool,
    /// Ignore deadlines and stop requests until the iteration finishes
    pub must_complete: bool,
    pub start: Instant,
    pub deadline: Option<Instant>,
    /// Iteration being searched
    pub current_depth: u8,
    /// Legal root moves searched in the current iteration
    pub root_moves: usize,
}

impl SearchState {
    pub fn new() -> Self {
        Self {
            ply: 0,
            nodes: 0,
            seldepth: 0,
            stopped: false,
            stop_requested: false,
            must_complete: false,
            start: Instant::now(),
            deadline: None,
            current_depth: 0,
            root_moves: 0,
        }
    }

    pub fn deadline_passed(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything a root search borrows or owns while it runs.
///
/// The position is mutated in place and restored after every trial move;
/// the transposition and history tables outlive the search.
pub struct Search<'a> {
    pub(crate) pos: &'a mut GameState,
    pub(crate) tt: &'a mut TranspositionTable,
    pub(crate) history: &'a mut HistoryTable,
    pub(crate) comms: &'a mut dyn Communicator,
    pub(crate) config: &'a EngineConfig,
    pub info: SearchState,
    pub(crate) pv: Box<PvTable>,
}

impl<'a> Search<'a> {
    pub fn new(
        pos: &'a mut GameState,
        tt: &'a mut TranspositionTable,
        history: &'a mut HistoryTable,
        comms: &'a mut dyn Communicator,
        config: &'a EngineConfig,
    ) -> Self {
        Self {
            pos,
            tt,
            history,
            comms,
            config,
            info: SearchState::new(),
            pv: Box::new(PvTable::new()),
        }
    }

    pub fn pv(&self) -> &PvTable {
        &self.pv
    }

    /// Check the clock and the communicator.
    ///
    /// While `must_complete` is set a stop request is only remembered.
    pub(crate) fn communicate(&mut self) {
        if self.comms.poll() {
            self.info.stop_requested = true;
        }

        if self.info.must_complete {
            return;
        }

        if self.info.stop_requested || self.info.deadline_passed() {
            self.info.stopped = true;
        }
    }

    /// Poll every `COMM_MASK + 1` nodes. Returns true when the search must unwind.
    #[inline]
    pub(crate) fn should_unwind(&mut self) -> bool {
        if self.info.stopped {
            return true;
        }

        if self.info.nodes & COMM_MASK == 0 {
            self.communicate();
        }

        self.info.stopped
    }

    /// Alpha-beta search of the current position to `depth` plies.
    ///
    /// Returns the score for the side to move. After a stop the return value
    /// is a placeholder 0 that callers must ignore.
    pub fn negamax(&mut self, mut alpha: Score, mut beta: Score, depth: Depth) -> Score {
        if self.should_unwind() {
            return 0;
        }

        let ply = self.info.ply;
        self.pv.reset_row(ply);

        if ply >= MAX_PLY - 1 {
            return evaluate(self.pos.board());
        }

        let root = ply == 0;

        if !root {
            if self.pos.is_repetition(ply) || self.pos.fifty_move() >= 100 {
                return 0;
            }

            // No line from here can beat a mate already found closer to the root
            if self.config.mate_distance_pruning {
                alpha = alpha.max(mated_in(ply));
                beta = beta.min(mate_in(ply + 1));
                if alpha >= beta {
                    return alpha;
                }
            }
        }

        if depth <= 0 {
            return self.quiescence(alpha, beta);
        }

        self.info.seldepth = self.info.seldepth.max(ply + 1);

        let key = self.pos.key();
        let mut tt_move = None;
        let mut static_eval = EVAL_NONE;

        if let Some(entry) = self.tt.probe(key, ply) {
            tt_move = entry.best_move();
            static_eval = entry.eval();

            if !root && self.config.tt_cutoffs && entry.depth() >= depth {
                let score = entry.score();
                // Scores inside the window are searched so the PV row gets filled
                let usable = ((entry.flags.contains(TTFlags::EXACT)
                    || entry.flags.contains(TTFlags::BETA))
                    && score >= beta)
                    || ((entry.flags.contains(TTFlags::EXACT)
                        || entry.flags.contains(TTFlags::ALPHA))
                        && score <= alpha);

                if usable {
                    trace!("tt cutoff at ply {} depth {} score {}", ply, depth, score);
                    return score;
                }
            }
        }

        let in_check = self.pos.in_check();
        let moves = generate_moves(self.pos, tt_move, self.history);
        let snapshot = self.pos.snapshot();

        let original_alpha = alpha;
        let mut best_score = -INFINITY;
        let mut best_move = None;
        let mut searched = 0usize;

        for scored in &moves {
            let mv = scored.mv;

            if !self.pos.apply(mv) {
                self.pos.restore(snapshot);
                continue;
            }

            searched += 1;
            self.info.nodes += 1;

            if root {
                self.info.root_moves = searched;
                if self.info.current_depth >= self.config.log_root_moves_from_depth {
                    self.comms.current_move(
                        self.info.current_depth,
                        mv,
                        searched,
                        scored.display_score(),
                    );
                }
            }

            self.info.ply += 1;
            let score = -self.negamax(-beta, -alpha, depth - 1);
            self.info.ply -= 1;
            self.pos.restore(snapshot);

            if self.info.stopped {
                return 0;
            }

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
                self.pv.update(ply, mv);
            }

            if score > alpha {
                alpha = score;

                if alpha >= beta {
                    if !self.pos.is_tactical(mv) {
                        self.history.update(self.pos.side_to_move(), mv, depth);
                    }
                    break;
                }
            }
        }

        if searched == 0 {
            return if in_check { mated_in(ply) } else { 0 };
        }

        let flags = if best_score >= beta {
            TTFlags::BETA
        } else if alpha != original_alpha {
            TTFlags::EXACT
        } else {
            TTFlags::ALPHA
        };

        self.tt
            .write(key, best_score, static_eval, depth, flags, best_move, ply);

        best_score
    }
}
