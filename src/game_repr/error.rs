use thiserror::Error;

/// Errors raised while setting up a position for search.
///
/// The search itself never fails: illegal moves and stop requests are
/// ordinary in-band results there.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid FEN '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },

    #[error("illegal move {mv} in the current position")]
    IllegalMove { mv: String },

    #[error("cannot parse move '{text}'")]
    UnparsableMove { text: String },

    #[error("unknown difficulty '{name}' (expected easy, medium, hard or expert)")]
    UnknownDifficulty { name: String },
}
