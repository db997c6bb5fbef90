use super::score::MAX_PLY;
use chess::ChessMove;

/// Triangular principal variation table.
///
/// Row `p` holds the best line found from ply `p` onwards, stored from
/// index 0 of the row; `len[p]` is its length and never exceeds `MAX_PLY - p`.
pub struct PvTable {
    moves: [[Option<ChessMove>; MAX_PLY]; MAX_PLY],
    len: [usize; MAX_PLY],
}

impl PvTable {
    pub fn new() -> Self {
        Self {
            moves: [[None; MAX_PLY]; MAX_PLY],
            len: [0; MAX_PLY],
        }
    }

    pub fn clear(&mut self) {
        self.len = [0; MAX_PLY];
    }

    /// Forget the line stored at `ply`; called when a node is entered.
    #[inline]
    pub fn reset_row(&mut self, ply: usize) {
        if ply < MAX_PLY {
            self.len[ply] = 0;
        }
    }

    /// Make `mv` followed by the child's line the new line at `ply`.
    pub fn update(&mut self, ply: usize, mv: ChessMove) {
        if ply >= MAX_PLY {
            return;
        }

        let (head, tail) = self.moves.split_at_mut(ply + 1);
        let row = &mut head[ply];
        row[0] = Some(mv);

        let child_len = if ply + 1 < MAX_PLY {
            // The row at `ply` has one slot fewer than the row above it allows
            let len = self.len[ply + 1].min(MAX_PLY - ply - 1);
            row[1..=len].copy_from_slice(&tail[0][..len]);
            len
        } else {
            0
        };

        self.len[ply] = child_len + 1;
    }

    #[inline]
    pub fn len(&self, ply: usize) -> usize {
        if ply < MAX_PLY {
            self.len[ply]
        } else {
            0
        }
    }

    #[inline]
    pub fn is_empty(&self, ply: usize) -> bool {
        self.len(ply) == 0
    }

    /// Line stored at `ply`
    pub fn line(&self, ply: usize) -> impl Iterator<Item = ChessMove> + '_ {
        let row: &[Option<ChessMove>] = if ply < MAX_PLY {
            &self.moves[ply][..self.len[ply]]
        } else {
            &[]
        };
        row.iter().flatten().copied()
    }

    pub fn best_move(&self) -> Option<ChessMove> {
        if self.len[0] > 0 {
            self.moves[0][0]
        } else {
            None
        }
    }
}

impl Default for PvTable {
    fn default() -> Self {
        Self::new()
    }
}
