use super::EngineError;
use chess::{Board, ChessMove, Color, MoveGen, Piece};
use std::str::FromStr;

/*
 * MODULE IS RESPONSIBLE FOR
 * THE LIVE POSITION THE SEARCH MUTATES AND RESTORES
 */

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Restorable copy of everything `apply` changes.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot {
    board: Board,
    fifty_move: u8,
    history_len: usize,
}

/// A position plus the game history the search needs for draw detection.
///
/// Board representation, legal move generation and the incrementally
/// maintained Zobrist key come from `chess::Board`; this type adds the
/// fifty-move counter and the key history of earlier positions.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    /// Half moves since the last capture or pawn move
    fifty_move: u8,
    /// Keys of every earlier position, oldest first
    history: Vec<u64>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            board: Board::default(),
            fifty_move: 0,
            history: Vec::with_capacity(256),
        }
    }
}

impl GameState {
    pub fn from_fen(fen: &str) -> Result<GameState, EngineError> {
        let board = Board::from_str(fen).map_err(|e| EngineError::InvalidFen {
            fen: fen.to_string(),
            reason: format!("{:?}", e),
        })?;

        // Halfmove clock is the fifth field; missing counters mean a fresh clock
        let fifty_move = fen
            .split_whitespace()
            .nth(4)
            .and_then(|field| field.parse::<u8>().ok())
            .unwrap_or(0);

        Ok(Self {
            board,
            fifty_move,
            history: Vec::with_capacity(256),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Incrementally maintained position key
    #[inline]
    pub fn key(&self) -> u64 {
        self.board.get_hash()
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    #[inline]
    pub fn in_check(&self) -> bool {
        self.board.checkers().popcnt() > 0
    }

    #[inline]
    pub fn fifty_move(&self) -> u8 {
        self.fifty_move
    }

    /// Number of positions that preceded this one
    pub fn ply_from_start(&self) -> usize {
        self.history.len()
    }

    #[inline]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board,
            fifty_move: self.fifty_move,
            history_len: self.history.len(),
        }
    }

    #[inline]
    pub fn restore(&mut self, snapshot: Snapshot) {
        self.board = snapshot.board;
        self.fifty_move = snapshot.fifty_move;
        self.history.truncate(snapshot.history_len);
    }

    /// Play `mv` if it is legal here. Returns `false` and leaves the state
    /// untouched otherwise.
    pub fn apply(&mut self, mv: ChessMove) -> bool {
        if !self.board.legal(mv) {
            return false;
        }

        let irreversible =
            self.is_capture(mv) || self.board.piece_on(mv.get_source()) == Some(Piece::Pawn);

        self.history.push(self.board.get_hash());
        self.fifty_move = if irreversible {
            0
        } else {
            self.fifty_move.saturating_add(1)
        };
        self.board = self.board.make_move_new(mv);

        true
    }

    /// Game-level move application, used to replay a game before searching.
    pub fn push_move(&mut self, mv: ChessMove) -> Result<(), EngineError> {
        if self.apply(mv) {
            Ok(())
        } else {
            Err(EngineError::IllegalMove { mv: mv.to_string() })
        }
    }

    /// Resolve a coordinate move ("e2e4", "e7e8q") against the legal moves.
    pub fn parse_move(&self, text: &str) -> Result<ChessMove, EngineError> {
        let wanted = text.trim().to_ascii_lowercase();
        MoveGen::new_legal(&self.board)
            .find(|mv| mv.to_string() == wanted)
            .ok_or(EngineError::UnparsableMove {
                text: text.to_string(),
            })
    }

    pub fn legal_moves(&self) -> Vec<ChessMove> {
        MoveGen::new_legal(&self.board).collect()
    }

    /// True when the current key already appeared with the same side to move:
    /// once inside the current search tree (`ply` plies back at most), or
    /// twice anywhere since the last irreversible move.
    pub fn is_repetition(&self, ply: usize) -> bool {
        let key = self.board.get_hash();
        let window = (self.fifty_move as usize).min(self.history.len());
        let mut seen = 0;

        // Skip the previous position (other side to move), then every second one
        for (i, &earlier) in self
            .history
            .iter()
            .rev()
            .take(window)
            .skip(1)
            .step_by(2)
            .enumerate()
        {
            if earlier != key {
                continue;
            }

            let distance = 2 * (i + 1);
            if distance <= ply {
                return true;
            }

            seen += 1;
            if seen >= 2 {
                return true;
            }
        }

        false
    }

    #[inline]
    pub fn is_en_passant(&self, mv: ChessMove) -> bool {
        self.board.piece_on(mv.get_source()) == Some(Piece::Pawn)
            && mv.get_source().get_file() != mv.get_dest().get_file()
            && self.board.piece_on(mv.get_dest()).is_none()
    }

    #[inline]
    pub fn is_capture(&self, mv: ChessMove) -> bool {
        self.board.piece_on(mv.get_dest()).is_some() || self.is_en_passant(mv)
    }

    /// Captures, en passant and promotions
    #[inline]
    pub fn is_tactical(&self, mv: ChessMove) -> bool {
        mv.get_promotion().is_some() || self.is_capture(mv)
    }
}
