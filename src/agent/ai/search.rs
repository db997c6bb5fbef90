// Iterative Deepening Search Orchestrator
//
// Searches depth 1, 2, 3, ... until the depth limit, the deadline or an
// external stop. Depth 1 always runs to completion so that a move exists
// however tight the clock is. Only completed iterations are reported; an
// interrupted one is thrown away and the previous result stands.

use super::communicator::Communicator;
use super::config::{EngineConfig, SearchLimits};
use super::move_ordering::HistoryTable;
use super::negamax::Search;
use super::score::{ScoreReport, Score, INFINITY};
use super::transposition_table::TranspositionTable;
use crate::game_repr::GameState;
use chess::ChessMove;
use log::{debug, info, warn};
use std::fmt;
use std::time::{Duration, Instant};

/// Result of a search operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<ChessMove>,
    pub score: Score,
    /// Last completed iteration
    pub depth: u8,
    pub seldepth: usize,
    pub nodes_searched: u64,
    pub time_ms: u64,
    pub principal_variation: Vec<ChessMove>,
    /// Legal root moves searched in the last completed iteration
    pub root_moves: usize,
}

/// Progress report of one completed iteration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchInfo {
    pub depth: u8,
    pub seldepth: usize,
    pub nodes: u64,
    pub score: Score,
    pub pv: Vec<ChessMove>,
    pub elapsed: Duration,
    /// Permille of the transposition table written during this search
    pub hashfull: u32,
}

impl SearchInfo {
    pub fn nps(&self) -> u64 {
        // Floor the elapsed time so a sub-millisecond iteration does not divide by zero
        let elapsed_ms = (self.elapsed.as_millis() as u64).max(1);
        self.nodes * 1000 / elapsed_ms
    }
}

impl fmt::Display for SearchInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "info depth {} seldepth {} nodes {} score {} pv",
            self.depth,
            self.seldepth,
            self.nodes,
            ScoreReport::from(self.score)
        )?;

        for mv in &self.pv {
            write!(f, " {}", mv)?;
        }

        write!(f, " nps {}", self.nps())
    }
}

/// Run iterative deepening on `pos` within `limits`.
///
/// `pos` is restored to its original state before returning. The table and
/// the history heuristic are carried over from earlier searches; the caller
/// clears them between unrelated games.
pub fn iterative_deepening_search(
    pos: &mut GameState,
    tt: &mut TranspositionTable,
    history: &mut HistoryTable,
    limits: &SearchLimits,
    config: &EngineConfig,
    comms: &mut dyn Communicator,
) -> SearchResult {
    let start = Instant::now();
    let deadline = limits.deadline(pos.side_to_move(), start);

    if deadline.is_some_and(|deadline| deadline <= start) {
        warn!("no time left for this move, searching depth 1 only");
    }

    tt.mark_stale();
    history.age();

    let mut search = Search::new(pos, tt, history, comms, config);
    search.info.start = start;
    search.info.deadline = deadline;

    let mut result = SearchResult::default();

    for depth in 1..=limits.max_depth() {
        search.info.current_depth = depth;
        search.info.must_complete = depth == 1;
        search.info.ply = 0;
        search.info.seldepth = 0;
        search.info.root_moves = 0;

        let score = search.negamax(-INFINITY, INFINITY, depth as i32);

        if search.info.stopped {
            debug!(
                "depth {} interrupted after {} nodes, keeping depth {}",
                depth, search.info.nodes, result.depth
            );
            break;
        }

        let elapsed = start.elapsed();
        let pv: Vec<ChessMove> = search.pv().line(0).collect();

        result = SearchResult {
            best_move: search.pv().best_move(),
            score,
            depth,
            seldepth: search.info.seldepth,
            nodes_searched: search.info.nodes,
            time_ms: elapsed.as_millis() as u64,
            principal_variation: pv.clone(),
            root_moves: search.info.root_moves,
        };

        let report = SearchInfo {
            depth,
            seldepth: search.info.seldepth,
            nodes: search.info.nodes,
            score,
            pv,
            elapsed,
            hashfull: search.tt.hashfull(),
        };
        search.comms.info(&report);

        debug!(
            "depth {} score {} nodes {} time {}ms tt hit rate {:.1}% hashfull {}",
            depth,
            ScoreReport::from(score),
            search.info.nodes,
            result.time_ms,
            search.tt.hit_rate() * 100.0,
            report.hashfull
        );

        // Mate or stalemate at the root: deeper iterations cannot change anything
        if result.root_moves == 0 {
            break;
        }

        // Small trees can finish an iteration between two node-count polls
        search.info.must_complete = false;
        search.communicate();
        if search.info.stopped {
            break;
        }
    }

    match result.best_move {
        Some(mv) => info!(
            "best move {} ({}) at depth {} after {} nodes",
            mv,
            ScoreReport::from(result.score),
            result.depth,
            result.nodes_searched
        ),
        None => info!("no legal move, score {}", ScoreReport::from(result.score)),
    }

    search.comms.best_move(result.best_move);
    result
}
