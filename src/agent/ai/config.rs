// Engine configuration and per-search limits

use super::score::MAX_PLY;
use super::transposition_table::TranspositionTable;
use chess::Color;
use std::time::{Duration, Instant};

/// Divisor applied to the remaining clock in time-control mode
const MOVES_TO_GO: u32 = 20;

/// Safety margin for the time between deciding on a move and the GUI receiving it
const COMMUNICATION_LATENCY: Duration = Duration::from_millis(10);

/// Long-lived engine settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Transposition table slots, rounded up to a power of two
    pub tt_entries: usize,
    pub mate_distance_pruning: bool,
    /// Return stored bounds at non-root nodes when the entry is deep enough
    pub tt_cutoffs: bool,
    /// Root moves are reported through `Communicator::current_move` from this depth on
    pub log_root_moves_from_depth: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tt_entries: 1 << 20,
            mate_distance_pruning: true,
            tt_cutoffs: true,
            log_root_moves_from_depth: 8,
        }
    }
}

impl EngineConfig {
    /// Size the transposition table from a megabyte budget
    pub fn with_hash_mb(mut self, mb: usize) -> Self {
        self.tt_entries = TranspositionTable::entries_for_mb(mb);
        self
    }
}

/// How long a single root search may run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchLimits {
    /// Until stopped from outside
    Infinite,
    /// Fixed number of iterations
    Depth(u8),
    /// Fixed wall-clock time
    MoveTime(Duration),
    /// Whichever of the depth and the time runs out first
    DepthAndTime(u8, Duration),
    /// Remaining clock and increment of both sides
    Clock {
        wtime: Duration,
        btime: Duration,
        winc: Duration,
        binc: Duration,
    },
}

impl SearchLimits {
    /// Last iteration the driver may start
    pub fn max_depth(&self) -> u8 {
        let deepest = (MAX_PLY - 1) as u8;
        match self {
            SearchLimits::Depth(depth) | SearchLimits::DepthAndTime(depth, _) => {
                (*depth).clamp(1, deepest)
            }
            _ => deepest,
        }
    }

    /// Wall-clock deadline for a search started at `now` with `side` to move.
    /// `None` means the search only ends on depth or an external stop.
    pub fn deadline(&self, side: Color, now: Instant) -> Option<Instant> {
        match *self {
            SearchLimits::Infinite | SearchLimits::Depth(_) => None,
            SearchLimits::MoveTime(time) | SearchLimits::DepthAndTime(_, time) => Some(now + time),
            SearchLimits::Clock {
                wtime,
                btime,
                winc,
                binc,
            } => {
                let (time, inc) = match side {
                    Color::White => (wtime, winc),
                    Color::Black => (btime, binc),
                };

                let budget = (time / MOVES_TO_GO + inc / 2).saturating_sub(COMMUNICATION_LATENCY);
                Some(now + budget)
            }
        }
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits::Depth(4)
    }
}
