mod error;
mod moves;
mod position;

pub use error::*;
pub use moves::*;
pub use position::*;

// Re-exported so callers do not need a direct dependency on the board crate
pub use chess::{Board, ChessMove, Color, Piece, Square};
