use super::score::{Depth, Score, EVAL_NONE, MATE_VALUE};
use crate::game_repr::PackedMove;
use chess::ChessMove;

/// Bound and marker bits of a table entry
///
/// Exactly one of ALPHA / BETA / EXACT / INVALID describes the score:
/// - ALPHA: upper bound, every move failed low
/// - BETA: lower bound, a move failed high
/// - EXACT: score inside the original window
/// - INVALID: slot never written
///
/// OLD marks an entry left over from an earlier root search; it is cleared
/// again on a probe hit. SINGULAR is reserved for singular-move markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TTFlags(u8);

impl TTFlags {
    pub const ALPHA: TTFlags = TTFlags(1);
    pub const BETA: TTFlags = TTFlags(2);
    pub const EXACT: TTFlags = TTFlags(4);
    pub const INVALID: TTFlags = TTFlags(8);
    pub const OLD: TTFlags = TTFlags(16);
    pub const SINGULAR: TTFlags = TTFlags(32);

    #[inline]
    pub fn contains(self, other: TTFlags) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn insert(&mut self, other: TTFlags) {
        self.0 |= other.0;
    }

    #[inline]
    pub fn remove(&mut self, other: TTFlags) {
        self.0 &= !other.0;
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        !self.contains(TTFlags::INVALID)
    }
}

/// Entry in the transposition table (16 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    /// Full position key, compared on every probe
    pub key: u64,
    /// Best move found at this node
    pub best_move: PackedMove,
    /// Remaining depth the node was searched with
    pub depth: i8,
    pub flags: TTFlags,
    /// Mate scores are stored relative to the storing node
    pub score: i16,
    /// Cached static evaluation, `EVAL_NONE` when unknown
    pub eval: i16,
}

impl Default for TTEntry {
    fn default() -> Self {
        Self {
            key: 0,
            best_move: PackedMove::NONE,
            depth: 0,
            flags: TTFlags::INVALID,
            score: 0,
            eval: EVAL_NONE as i16,
        }
    }
}

impl TTEntry {
    #[inline]
    pub fn score(&self) -> Score {
        self.score as Score
    }

    #[inline]
    pub fn eval(&self) -> Score {
        self.eval as Score
    }

    #[inline]
    pub fn depth(&self) -> Depth {
        self.depth as Depth
    }

    #[inline]
    pub fn best_move(&self) -> Option<ChessMove> {
        self.best_move.unpack()
    }
}

/// Convert a root-relative mate score into one relative to the node at `ply`.
#[inline]
fn score_to_tt(score: Score, ply: usize) -> Score {
    if score > MATE_VALUE {
        score + ply as Score
    } else if score < -MATE_VALUE {
        score - ply as Score
    } else {
        score
    }
}

/// Inverse of `score_to_tt` for the probing node's ply.
#[inline]
fn score_from_tt(score: Score, ply: usize) -> Score {
    if score > MATE_VALUE {
        score - ply as Score
    } else if score < -MATE_VALUE {
        score + ply as Score
    } else {
        score
    }
}

/// Direct-mapped transposition table.
///
/// One entry per slot, slot = key modulo capacity, capacity a power of two.
/// Replacement is depth-preferred and nothing is aged out: entries from
/// earlier searches stay until a deeper-or-equal write lands on their slot,
/// so the owner must `clear` the table between unrelated games.
pub struct TranspositionTable {
    entries: Vec<TTEntry>,
    /// Statistics: number of successful probes
    pub hits: u64,
    /// Statistics: number of failed probes
    pub misses: u64,
}

impl TranspositionTable {
    /// Create a table holding `entries` slots, rounded up to a power of two
    pub fn new(entries: usize) -> Self {
        let capacity = entries.max(1).next_power_of_two();
        Self {
            entries: vec![TTEntry::default(); capacity],
            hits: 0,
            misses: 0,
        }
    }

    /// Create the largest power-of-two table that fits in `mb` megabytes
    pub fn with_size_mb(mb: usize) -> Self {
        Self::new(Self::entries_for_mb(mb))
    }

    pub fn entries_for_mb(mb: usize) -> usize {
        let fit = (mb.max(1) * 1024 * 1024 / std::mem::size_of::<TTEntry>()).max(1);
        1 << (usize::BITS - 1 - fit.leading_zeros())
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    fn index(&self, key: u64) -> usize {
        (key % self.entries.len() as u64) as usize
    }

    /// Look up `key` for the node at `ply`.
    ///
    /// A slot holding a different key is a miss. On a hit the OLD marker is
    /// cleared and a copy is returned with the mate score re-based on `ply`.
    pub fn probe(&mut self, key: u64, ply: usize) -> Option<TTEntry> {
        let idx = self.index(key);
        let entry = &mut self.entries[idx];

        if entry.key != key || !entry.flags.is_valid() {
            self.misses += 1;
            return None;
        }

        entry.flags.remove(TTFlags::OLD);
        self.hits += 1;

        let mut hit = *entry;
        hit.score = score_from_tt(hit.score(), ply) as i16;
        Some(hit)
    }

    /// Store a search result for the node at `ply`.
    ///
    /// The slot is overwritten only when `depth` is at least the depth
    /// already stored there, whichever position that entry belongs to.
    #[allow(clippy::too_many_arguments)]
    pub fn write(
        &mut self,
        key: u64,
        score: Score,
        static_eval: Score,
        depth: Depth,
        flags: TTFlags,
        best_move: Option<ChessMove>,
        ply: usize,
    ) {
        let idx = self.index(key);
        let entry = &mut self.entries[idx];

        if depth < entry.depth() {
            return;
        }

        *entry = TTEntry {
            key,
            best_move: PackedMove::from_option(best_move),
            depth: depth.clamp(i8::MIN as Depth, i8::MAX as Depth) as i8,
            flags,
            score: score_to_tt(score, ply) as i16,
            eval: static_eval as i16,
        };
    }

    /// Mark every stored entry as left over from a previous search.
    /// Replacement ignores the marker; `hashfull` does not count marked entries.
    pub fn mark_stale(&mut self) {
        for entry in self.entries.iter_mut().filter(|e| e.flags.is_valid()) {
            entry.flags.insert(TTFlags::OLD);
        }
    }

    /// Clear the transposition table
    pub fn clear(&mut self) {
        self.entries.fill(TTEntry::default());
        self.hits = 0;
        self.misses = 0;
    }

    /// Reallocate with a new capacity; all entries are lost
    pub fn resize(&mut self, entries: usize) {
        *self = Self::new(entries);
    }

    /// Permille of sampled slots holding an entry written during this search
    pub fn hashfull(&self) -> u32 {
        let sample = self.entries.len().min(1000);
        let used = self.entries[..sample]
            .iter()
            .filter(|e| e.flags.is_valid() && !e.flags.contains(TTFlags::OLD))
            .count();

        (used * 1000 / sample) as u32
    }

    /// Get hit rate (0.0 to 1.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new(1 << 20)
    }
}
