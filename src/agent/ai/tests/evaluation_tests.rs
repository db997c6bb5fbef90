// Comprehensive tests for evaluation function

use crate::agent::ai::evaluation::{evaluate, evaluate_pawn_structure, game_phase, TaperedScore};
use crate::game_repr::{Board, Color};
use std::str::FromStr;

fn board(fen: &str) -> Board {
    Board::from_str(fen).unwrap()
}

#[test]
fn test_starting_position_balanced() {
    let score = evaluate(&Board::default());
    assert_eq!(score, 0, "Starting position is symmetric, got: {}", score);
}

#[test]
fn test_material_queen_advantage() {
    // Black queen removed
    let pos = board("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    let score = evaluate(&pos);

    assert!(score > 850, "Extra queen should give large advantage: {}", score);
}

#[test]
fn test_material_pawn_advantage() {
    let pos = board("rnbqkbnr/ppppppp1/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    let score = evaluate(&pos);

    assert!(score > 80 && score < 150, "Extra pawn advantage: {}", score);
}

#[test]
fn test_material_rook_vs_knight() {
    let rook = board("4k3/8/8/8/8/8/R7/4K3 w - - 0 1");
    let knight = board("4k3/8/8/8/8/8/N7/4K3 w - - 0 1");

    assert!(evaluate(&rook) > evaluate(&knight), "Rook should be stronger than knight");
}

#[test]
fn test_perspective_flip() {
    // Same placement, only the side to move differs
    let white = board("4k3/8/8/8/8/8/R7/4K3 w - - 0 1");
    let black = board("4k3/8/8/8/8/8/R7/4K3 b - - 0 1");

    assert_eq!(evaluate(&white), -evaluate(&black));
    assert!(evaluate(&white) > 0);
}

#[test]
fn test_piece_square_tables_matter() {
    let center = board("4k3/8/8/4N3/8/8/8/4K3 w - - 0 1");
    let edge = board("4k3/8/8/N7/8/8/8/4K3 w - - 0 1");

    assert!(evaluate(&center) > evaluate(&edge), "Central knight should be valued higher");
}

#[test]
fn test_pawn_advancement_bonus() {
    let advanced = board("4k3/4P3/8/8/8/8/8/4K3 w - - 0 1");
    let starting = board("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1");

    assert!(evaluate(&advanced) > evaluate(&starting), "Advanced pawn should be more valuable");
}

#[test]
fn test_doubled_pawns_penalized() {
    let doubled = board("4k3/8/8/8/4P3/4P3/8/4K3 w - - 0 1");
    let normal = board("4k3/8/8/8/3P4/4P3/8/4K3 w - - 0 1");

    assert!(evaluate(&doubled) < evaluate(&normal), "Doubled pawns should be penalized");
}

#[test]
fn test_isolated_pawns_penalized() {
    // Same material and ranks, only the file gap differs
    let isolated = board("4k3/8/8/8/P1P5/8/8/4K3 w - - 0 1");
    let connected = board("4k3/8/8/8/PP6/8/8/4K3 w - - 0 1");

    assert!(evaluate(&isolated) < evaluate(&connected), "Isolated pawns should be penalized");
}

#[test]
fn test_passed_pawn_rewarded() {
    let passed = board("4k3/8/8/8/4P3/8/8/4K3 w - - 0 1");
    let blocked = board("4k3/4p3/8/8/4P3/8/8/4K3 w - - 0 1");

    let passed_score = evaluate_pawn_structure(&passed, Color::White);
    let blocked_score = evaluate_pawn_structure(&blocked, Color::White);

    assert!(passed_score.mg > blocked_score.mg && passed_score.eg > blocked_score.eg);
}

#[test]
fn test_black_pawn_passed_towards_rank_one() {
    let pos = board("4k3/8/8/8/3p4/8/8/4K3 b - - 0 1");
    let score = evaluate_pawn_structure(&pos, Color::Black);

    // Passed but isolated
    assert!(score.eg > 0);
}

#[test]
fn test_bishop_pair_bonus() {
    let pair = board("4k3/8/8/8/8/8/8/2B1KB2 w - - 0 1");
    let mixed = board("4k3/8/8/8/8/8/8/2B1KN2 w - - 0 1");

    // 20 material + 20 piece-square, the rest is the pair bonus
    assert!(evaluate(&pair) - evaluate(&mixed) > 60);
}

#[test]
fn test_game_phase_bounds() {
    assert_eq!(game_phase(&Board::default()), 256);
    assert_eq!(game_phase(&board("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1")), 0);
}

#[test]
fn test_complex_middlegame_position() {
    let pos = board("r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4");
    let score = evaluate(&pos);

    assert!(score.abs() < 500, "Complex position eval: {}", score);
}

#[test]
fn test_tapered_score_interpolation() {
    let score = TaperedScore::new(100, 300);

    assert_eq!(score.interpolate(256), 100);
    assert_eq!(score.interpolate(0), 300);
    assert_eq!(score.interpolate(128), 200);
}

#[test]
fn test_tapered_score_arithmetic() {
    let mut score = TaperedScore::new(10, 20);
    score.add(TaperedScore::new(5, 5));
    score.sub(TaperedScore::new(1, 2));

    assert_eq!(score, TaperedScore::new(14, 23));
}
