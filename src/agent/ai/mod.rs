// AI Agent - Negamax with Alpha-Beta Pruning
//
// This module implements a classical chess search using the Negamax algorithm
// with alpha-beta pruning, iterative deepening, and a transposition table.
//
// Key features:
// - Deterministic for a fixed depth (same position always gives same move)
// - Direct-mapped transposition table shared across iterations and moves
// - Quiescence search to avoid the horizon effect
// - Mate distance pruning, repetition and fifty-move draws
// - Move ordering by transposition move, MVV-LVA and history heuristic
// - Cooperative stop through a polled communicator

pub mod communicator;
mod config;
mod evaluation;
mod move_ordering;
mod negamax;
mod negamax_player;
mod piece_square_tables;
mod pv;
mod quiescence;
pub mod score;
mod search;
mod transposition_table;

#[cfg(test)]
mod tests;

pub use communicator::{Communicator, Recorder, Silent, StdoutCommunicator};
pub use config::{EngineConfig, SearchLimits};
pub use evaluation::evaluate;
pub use move_ordering::{generate_captures, generate_moves, HistoryTable, MoveList, ScoredMove};
pub use negamax::{Search, SearchState, COMM_MASK};
pub use negamax_player::{Difficulty, NegamaxPlayer};
pub use pv::PvTable;
pub use search::{iterative_deepening_search, SearchInfo, SearchResult};
pub use transposition_table::{TTEntry, TTFlags, TranspositionTable};
