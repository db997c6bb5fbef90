//! NegamaxPlayer - engine object owning the long-lived search tables
//!
//! A root search borrows the transposition table and the history heuristic
//! from the player, so both survive from one move to the next. Call
//! [`NegamaxPlayer::new_game`] before searching positions from an unrelated
//! game; stale entries are otherwise only replaced by deeper writes.
//!
//! # Difficulty Levels
//!
//! - **Easy**: Depth 2
//! - **Medium**: Depth 4
//! - **Hard**: Depth 6
//! - **Expert**: Depth 8 with a 5 s time limit
//!
//! # Examples
//!
//! ```
//! use chess_search::agent::ai::{Difficulty, NegamaxPlayer};
//! use chess_search::game_repr::GameState;
//!
//! let mut ai = NegamaxPlayer::with_difficulty(Difficulty::Easy);
//! let state = GameState::default();
//! assert!(ai.best_move(&state).is_some());
//! ```

use super::communicator::{Communicator, Silent};
use super::config::{EngineConfig, SearchLimits};
use super::move_ordering::HistoryTable;
use super::search::{iterative_deepening_search, SearchResult};
use super::transposition_table::TranspositionTable;
use crate::game_repr::{EngineError, GameState};
use chess::ChessMove;
use log::debug;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// AI difficulty levels that map to search depth and time controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    /// Depth 2, no time limit
    Easy,
    /// Depth 4, no time limit
    #[default]
    Medium,
    /// Depth 6, no time limit
    Hard,
    /// Depth 8, 5 second time limit
    Expert,
}

impl Difficulty {
    /// Number of plies searched at this level
    pub fn max_depth(&self) -> u8 {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 4,
            Difficulty::Hard => 6,
            Difficulty::Expert => 8,
        }
    }

    /// Get the time limit in milliseconds for this difficulty level
    pub fn time_limit_ms(&self) -> Option<u64> {
        match self {
            Difficulty::Expert => Some(5000),
            _ => None,
        }
    }

    /// Search limits for one move at this level
    pub fn limits(&self) -> SearchLimits {
        match self.time_limit_ms() {
            Some(ms) => SearchLimits::DepthAndTime(self.max_depth(), Duration::from_millis(ms)),
            None => SearchLimits::Depth(self.max_depth()),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Expert => "Expert",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "expert" => Ok(Difficulty::Expert),
            _ => Err(EngineError::UnknownDifficulty {
                name: s.to_string(),
            }),
        }
    }
}

/// Engine object: configuration plus the tables shared by consecutive searches
pub struct NegamaxPlayer {
    name: String,
    config: EngineConfig,
    difficulty: Difficulty,
    tt: TranspositionTable,
    history: Box<HistoryTable>,
}

impl NegamaxPlayer {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_config(config, Difficulty::default())
    }

    /// Create a player with default settings and an auto-generated name "AI ({difficulty})"
    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        Self::with_config(EngineConfig::default(), difficulty)
    }

    pub fn with_config(config: EngineConfig, difficulty: Difficulty) -> Self {
        Self {
            name: format!("AI ({})", difficulty),
            tt: TranspositionTable::new(config.tt_entries),
            history: Box::new(HistoryTable::new()),
            config,
            difficulty,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Search `state` within `limits`, reporting through `comms`.
    ///
    /// The position is left unchanged.
    pub fn search(
        &mut self,
        state: &mut GameState,
        limits: SearchLimits,
        comms: &mut dyn Communicator,
    ) -> SearchResult {
        debug!(
            "{} searching {:?} with a {} entry table",
            self.name,
            limits,
            self.tt.capacity()
        );

        iterative_deepening_search(
            state,
            &mut self.tt,
            &mut self.history,
            &limits,
            &self.config,
            comms,
        )
    }

    /// Best move at this player's difficulty, searched silently
    pub fn best_move(&mut self, state: &GameState) -> Option<ChessMove> {
        let mut scratch = state.clone();
        let limits = self.difficulty.limits();
        self.search(&mut scratch, limits, &mut Silent).best_move
    }

    /// Forget everything learned from earlier positions
    pub fn new_game(&mut self) {
        self.tt.clear();
        self.history.clear();
    }

    /// Reallocate the transposition table; its contents are lost
    pub fn resize_hash(&mut self, entries: usize) {
        self.config.tt_entries = entries;
        self.tt.resize(entries);
    }

    pub fn table(&self) -> &TranspositionTable {
        &self.tt
    }
}

impl Default for NegamaxPlayer {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
