// Static evaluation used at quiescence leaves and the ply guard.
// Tapered material, piece-square values, pawn structure and the bishop pair.

use super::piece_square_tables::pst_value;
use super::score::Score;
use chess::{BitBoard, Board, Color, Piece, ALL_PIECES};

const PAWN_VALUE: i32 = 100;
const KNIGHT_VALUE: i32 = 300;
const BISHOP_VALUE: i32 = 320;
const ROOK_VALUE: i32 = 500;
const QUEEN_VALUE: i32 = 900;

// Phase weight of each non-pawn piece; all of them on the board is the opening
const KNIGHT_PHASE: i32 = 1;
const BISHOP_PHASE: i32 = 1;
const ROOK_PHASE: i32 = 2;
const QUEEN_PHASE: i32 = 4;
const TOTAL_PHASE: i32 = KNIGHT_PHASE * 4 + BISHOP_PHASE * 4 + ROOK_PHASE * 4 + QUEEN_PHASE * 2;

/// Middlegame and endgame halves of a score, blended by `game_phase`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TaperedScore {
    pub mg: i32,
    pub eg: i32,
}

impl TaperedScore {
    pub const fn new(mg: i32, eg: i32) -> Self {
        Self { mg, eg }
    }

    /// Blend with `phase` in 0 (bare kings and pawns) ..= 256 (full set)
    pub fn interpolate(&self, phase: i32) -> i32 {
        ((self.mg * phase) + (self.eg * (256 - phase))) / 256
    }

    pub fn add(&mut self, other: TaperedScore) {
        self.mg += other.mg;
        self.eg += other.eg;
    }

    pub fn sub(&mut self, other: TaperedScore) {
        self.mg -= other.mg;
        self.eg -= other.eg;
    }
}

const DOUBLED_PAWN_PENALTY: TaperedScore = TaperedScore::new(15, 20);
const ISOLATED_PAWN_PENALTY: TaperedScore = TaperedScore::new(20, 25);
const PASSED_PAWN_BONUS: TaperedScore = TaperedScore::new(20, 45);
const BISHOP_PAIR_BONUS: TaperedScore = TaperedScore::new(40, 50);

fn piece_value(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => PAWN_VALUE,
        Piece::Knight => KNIGHT_VALUE,
        Piece::Bishop => BISHOP_VALUE,
        Piece::Rook => ROOK_VALUE,
        Piece::Queen => QUEEN_VALUE,
        Piece::King => 0,
    }
}

fn piece_phase(piece: Piece) -> i32 {
    match piece {
        Piece::Knight => KNIGHT_PHASE,
        Piece::Bishop => BISHOP_PHASE,
        Piece::Rook => ROOK_PHASE,
        Piece::Queen => QUEEN_PHASE,
        Piece::Pawn | Piece::King => 0,
    }
}

#[inline]
fn pieces_of(board: &Board, piece: Piece, color: Color) -> BitBoard {
    *board.pieces(piece) & *board.color_combined(color)
}

/// Remaining non-pawn material scaled to 0 ..= 256
pub fn game_phase(board: &Board) -> i32 {
    let phase: i32 = ALL_PIECES
        .iter()
        .map(|&piece| piece_phase(piece) * board.pieces(piece).popcnt() as i32)
        .sum();

    ((phase * 256 + TOTAL_PHASE / 2) / TOTAL_PHASE).clamp(0, 256)
}

/// Material plus piece-square values for one side
fn evaluate_material_and_position(board: &Board, color: Color) -> TaperedScore {
    let mut score = TaperedScore::default();

    for &piece in ALL_PIECES.iter() {
        let value = piece_value(piece);
        for square in pieces_of(board, piece, color) {
            score.add(TaperedScore::new(value, value));
            score.add(pst_value(piece, square.to_index(), color));
        }
    }

    score
}

/// Pawns on each file, indexed a..h
fn pawns_per_file(pawns: BitBoard) -> [u32; 8] {
    let mut files = [0; 8];
    for square in pawns {
        files[square.get_file().to_index()] += 1;
    }
    files
}

/// A pawn is passed when no enemy pawn stands ahead of it on its own or an adjacent file
fn is_passed_pawn(square: usize, color: Color, enemy_pawns: BitBoard) -> bool {
    let rank = square / 8;
    let file = square % 8;

    !enemy_pawns.into_iter().any(|enemy| {
        let enemy_rank = enemy.get_rank().to_index();
        let enemy_file = enemy.get_file().to_index();
        let ahead = match color {
            Color::White => enemy_rank > rank,
            Color::Black => enemy_rank < rank,
        };

        ahead && enemy_file.abs_diff(file) <= 1
    })
}

/// Doubled and isolated penalties plus passed pawn bonuses for `color`
pub fn evaluate_pawn_structure(board: &Board, color: Color) -> TaperedScore {
    let mut score = TaperedScore::default();
    let own_pawns = pieces_of(board, Piece::Pawn, color);
    let enemy_pawns = pieces_of(board, Piece::Pawn, !color);
    let files = pawns_per_file(own_pawns);

    for square in own_pawns {
        let file = square.get_file().to_index();

        if files[file] > 1 {
            score.sub(DOUBLED_PAWN_PENALTY);
        }

        let supported = (file > 0 && files[file - 1] > 0) || (file < 7 && files[file + 1] > 0);
        if !supported {
            score.sub(ISOLATED_PAWN_PENALTY);
        }

        if is_passed_pawn(square.to_index(), color, enemy_pawns) {
            score.add(PASSED_PAWN_BONUS);
        }
    }

    score
}

fn evaluate_bishop_pair(board: &Board, color: Color) -> TaperedScore {
    if pieces_of(board, Piece::Bishop, color).popcnt() >= 2 {
        BISHOP_PAIR_BONUS
    } else {
        TaperedScore::default()
    }
}

fn evaluate_side(board: &Board, color: Color) -> TaperedScore {
    let mut score = evaluate_material_and_position(board, color);
    score.add(evaluate_pawn_structure(board, color));
    score.add(evaluate_bishop_pair(board, color));
    score
}

/// Centipawn score of `board` for the side to move
pub fn evaluate(board: &Board) -> Score {
    let phase = game_phase(board);

    let mut total = evaluate_side(board, Color::White);
    total.sub(evaluate_side(board, Color::Black));
    let score = total.interpolate(phase);

    if board.side_to_move() == Color::White {
        score
    } else {
        -score
    }
}

