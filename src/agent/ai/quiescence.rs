// Quiescence Search
//
// Extends the search past the nominal depth with captures only, so that the
// static evaluation is never taken in the middle of an exchange. A side in
// check has no stand-pat option and searches every evasion instead.

use super::evaluation::evaluate;
use super::move_ordering::{generate_captures, generate_moves};
use super::negamax::Search;
use super::score::{mated_in, Score, MAX_PLY};

impl Search<'_> {
    /// Fail-hard quiescence search: the result is clamped to `beta` on a cutoff.
    pub fn quiescence(&mut self, mut alpha: Score, beta: Score) -> Score {
        if self.should_unwind() {
            return 0;
        }

        let ply = self.info.ply;
        self.info.seldepth = self.info.seldepth.max(ply);

        if ply >= MAX_PLY - 1 {
            return evaluate(self.pos.board());
        }

        let in_check = self.pos.in_check();

        if !in_check {
            let stand_pat = evaluate(self.pos.board());
            if stand_pat >= beta {
                return stand_pat;
            }
            alpha = alpha.max(stand_pat);
        } else if self.pos.is_repetition(ply) {
            return 0;
        }

        let moves = if in_check {
            generate_moves(self.pos, None, self.history)
        } else {
            generate_captures(self.pos)
        };
        let snapshot = self.pos.snapshot();
        let mut searched = 0usize;

        for scored in &moves {
            if !self.pos.apply(scored.mv) {
                self.pos.restore(snapshot);
                continue;
            }

            searched += 1;
            self.info.nodes += 1;

            self.info.ply += 1;
            let score = -self.quiescence(-beta, -alpha);
            self.info.ply -= 1;
            self.pos.restore(snapshot);

            if self.info.stopped {
                return 0;
            }

            if score > alpha {
                alpha = score;
                if alpha >= beta {
                    return beta;
                }
            }
        }

        if in_check && searched == 0 {
            return mated_in(ply);
        }

        alpha
    }
}
