use chess::{ChessMove, ALL_PIECES, ALL_SQUARES};

/*-------ARCHITECTURE--------*/

// | 3 bits | 6 bits | 6 bits |
// | Promo  |   To   |  From  |
// |        16 bits           |

/// Compact move encoding stored in transposition table slots.
///
/// The promotion field holds the piece index of the promoted piece
/// (knight = 1 .. queen = 4), 0 when the move does not promote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PackedMove(u16);

impl PackedMove {
    /// a1a1 is never a real move, so the zero value doubles as "no move".
    pub const NONE: PackedMove = PackedMove(0);

    pub fn pack(mv: ChessMove) -> PackedMove {
        let mut buf = 0u16;
        buf |= mv.get_source().to_index() as u16;
        buf |= (mv.get_dest().to_index() as u16) << 6;
        if let Some(piece) = mv.get_promotion() {
            buf |= (piece.to_index() as u16) << 12;
        }

        PackedMove(buf)
    }

    pub fn from_option(mv: Option<ChessMove>) -> PackedMove {
        mv.map_or(PackedMove::NONE, PackedMove::pack)
    }

    /// Decode back into a move. The result is only a hint: it may not be
    /// legal in the probing position after a key collision.
    pub fn unpack(self) -> Option<ChessMove> {
        if self == PackedMove::NONE {
            return None;
        }

        let from = ALL_SQUARES[(self.0 & 0x3F) as usize];
        let to = ALL_SQUARES[((self.0 >> 6) & 0x3F) as usize];
        let promotion = match (self.0 >> 12) & 0x7 {
            0 => None,
            idx => ALL_PIECES.get(idx as usize).copied(),
        };

        Some(ChessMove::new(from, to, promotion))
    }

    pub fn is_none(self) -> bool {
        self == PackedMove::NONE
    }
}

impl From<ChessMove> for PackedMove {
    fn from(mv: ChessMove) -> Self {
        PackedMove::pack(mv)
    }
}
