pub mod ai;
pub use ai::{Difficulty, NegamaxPlayer, SearchLimits, SearchResult, TranspositionTable};
