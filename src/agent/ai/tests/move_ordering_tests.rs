// Comprehensive tests for move ordering

use crate::agent::ai::move_ordering::{
    generate_captures, generate_moves, HistoryTable, HISTORY_MAX, SCORE_BIAS,
};
use crate::game_repr::{ChessMove, Color, GameState, Piece, Square};
use chess::MoveGen;

fn state(fen: &str) -> GameState {
    GameState::from_fen(fen).unwrap()
}

#[test]
fn test_starting_position_ordering() {
    let pos = GameState::default();
    let history = HistoryTable::new();
    let moves = generate_moves(&pos, None, &history);

    assert_eq!(moves.len(), 20);
    for scored in &moves {
        assert!(pos.board().legal(scored.mv));
        assert_eq!(scored.score, SCORE_BIAS);
        assert_eq!(scored.display_score(), 0);
    }
}

#[test]
fn test_equal_scores_keep_generation_order() {
    let pos = GameState::default();
    let ordered: Vec<ChessMove> = generate_moves(&pos, None, &HistoryTable::new())
        .iter()
        .map(|scored| scored.mv)
        .collect();
    let generated: Vec<ChessMove> = MoveGen::new_legal(pos.board()).collect();

    assert_eq!(ordered, generated);
}

#[test]
fn test_tt_move_goes_first() {
    let pos = GameState::default();
    let hint = ChessMove::new(Square::G1, Square::F3, None);
    let moves = generate_moves(&pos, Some(hint), &HistoryTable::new());

    assert_eq!(moves[0].mv, hint);
    assert!(moves[0].score > moves[1].score);
}

#[test]
fn test_display_score_removes_bias() {
    // Free black queen on e4, plus a TT hint on a quiet move
    let pos = state("rnb1kbnr/pppppppp/8/8/4q3/2N5/PPPPPPPP/R1BQKBNR w KQkq - 0 1");
    let hint = ChessMove::new(Square::G1, Square::F3, None);
    let moves = generate_moves(&pos, Some(hint), &HistoryTable::new());

    for scored in &moves {
        assert_eq!(scored.display_score(), scored.score - SCORE_BIAS);
    }

    let capture = moves
        .iter()
        .find(|scored| scored.mv == ChessMove::new(Square::C3, Square::E4, None))
        .unwrap();
    assert!(capture.display_score() > 0);
    assert!(moves.iter().any(|scored| scored.display_score() == 0));
}

#[test]
fn test_captures_prioritized() {
    // Free black queen on e4
    let pos = state("rnb1kbnr/pppppppp/8/8/4q3/2N5/PPPPPPPP/R1BQKBNR w KQkq - 0 1");
    let moves = generate_moves(&pos, None, &HistoryTable::new());

    assert_eq!(moves[0].mv, ChessMove::new(Square::C3, Square::E4, None));
}

#[test]
fn test_mvv_lva_principles() {
    // Rook on e4 can be taken by the d3 pawn or the f3 queen
    let pos = state("4k3/8/8/8/4r3/3P1Q2/8/7K w - - 0 1");
    let moves = generate_moves(&pos, None, &HistoryTable::new());

    assert_eq!(moves[0].mv, ChessMove::new(Square::D3, Square::E4, None));
    assert_eq!(moves[1].mv, ChessMove::new(Square::F3, Square::E4, None));
}

#[test]
fn test_promotion_prioritized() {
    let pos = state("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
    let moves = generate_moves(&pos, None, &HistoryTable::new());

    assert_eq!(moves[0].mv.get_promotion(), Some(Piece::Queen));
    assert!(moves[..4].iter().all(|scored| scored.mv.get_promotion().is_some()));
    assert!(moves[4..].iter().all(|scored| scored.mv.get_promotion().is_none()));
}

#[test]
fn test_captures_only_generation() {
    assert!(generate_captures(&GameState::default()).is_empty());

    let pos = state("rnb1kbnr/pppppppp/8/8/4q3/2N5/PPPPPPPP/R1BQKBNR w KQkq - 0 1");
    let captures = generate_captures(&pos);
    assert_eq!(captures.len(), 1);
    assert_eq!(captures[0].mv, ChessMove::new(Square::C3, Square::E4, None));
}

#[test]
fn test_captures_include_en_passant_and_promotions() {
    let ep = state("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3");
    let captures = generate_captures(&ep);
    assert!(captures
        .iter()
        .any(|scored| scored.mv == ChessMove::new(Square::E5, Square::F6, None)));

    let promo = state("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
    assert_eq!(generate_captures(&promo).len(), 4);
}

#[test]
fn test_history_reorders_quiet_moves() {
    let pos = GameState::default();
    let mut history = HistoryTable::new();
    let good = ChessMove::new(Square::B1, Square::C3, None);

    history.update(Color::White, good, 4);

    let moves = generate_moves(&pos, None, &history);
    assert_eq!(moves[0].mv, good);
    assert_eq!(moves[0].display_score(), 16);
}

#[test]
fn test_history_is_per_side() {
    let mut history = HistoryTable::new();
    let mv = ChessMove::new(Square::E2, Square::E4, None);

    history.update(Color::White, mv, 3);

    assert_eq!(history.get(Color::White, mv), 9);
    assert_eq!(history.get(Color::Black, mv), 0);
}

#[test]
fn test_history_gravity_stays_bounded() {
    let mut history = HistoryTable::new();
    let mv = ChessMove::new(Square::D2, Square::D4, None);

    for _ in 0..10_000 {
        history.update(Color::White, mv, 20);
    }

    let value = history.get(Color::White, mv);
    assert!(value > 0 && value <= HISTORY_MAX, "history value {}", value);
}

#[test]
fn test_history_age_and_clear() {
    let mut history = HistoryTable::new();
    let mv = ChessMove::new(Square::G1, Square::F3, None);

    history.update(Color::White, mv, 4);
    history.age();
    assert_eq!(history.get(Color::White, mv), 8);

    history.clear();
    assert_eq!(history.get(Color::White, mv), 0);
}

#[test]
fn test_ordering_consistency() {
    let pos = state("r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4");
    let history = HistoryTable::new();

    assert_eq!(
        generate_moves(&pos, None, &history),
        generate_moves(&pos, None, &history)
    );
}
