//! End-to-end tests for the search through the public API
//!
//! These drive `NegamaxPlayer` and `iterative_deepening_search` the way a
//! front-end would and check the observable results:
//! - Reported iterations and the final move
//! - Mates, stalemates and forced moves
//! - Stopping mid-iteration and time limits
//! - Table reuse across searches

use chess_search::agent::ai::{
    iterative_deepening_search, Difficulty, EngineConfig, HistoryTable, NegamaxPlayer, Recorder,
    SearchLimits, Silent, TranspositionTable,
};
use chess_search::agent::ai::score::{mate_in, mated_in};
use chess_search::game_repr::{GameState, START_FEN};
use std::time::{Duration, Instant};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

fn small_player() -> NegamaxPlayer {
    NegamaxPlayer::new(EngineConfig {
        tt_entries: 1 << 16,
        ..EngineConfig::default()
    })
}

#[test]
fn test_start_position_depth_four() {
    let mut player = small_player();
    let mut state = GameState::from_fen(START_FEN).unwrap();
    let before = state.key();
    let mut comms = Recorder::new();

    let result = player.search(&mut state, SearchLimits::Depth(4), &mut comms);

    assert_eq!(comms.depths(), vec![1, 2, 3, 4]);
    assert_eq!(result.depth, 4);
    assert_eq!(result.root_moves, 20);

    let best = result.best_move.expect("start position has moves");
    assert!(state.legal_moves().contains(&best));
    assert_eq!(comms.best_move, Some(best));
    assert_eq!(result.principal_variation.first(), Some(&best));

    // The caller's position is untouched
    assert_eq!(state.key(), before);
}

#[test]
fn test_reports_grow_with_depth() {
    let mut player = small_player();
    let mut state = GameState::from_fen(KIWIPETE).unwrap();
    let mut comms = Recorder::new();

    player.search(&mut state, SearchLimits::Depth(3), &mut comms);

    for pair in comms.infos.windows(2) {
        assert!(pair[1].nodes > pair[0].nodes, "node counts are cumulative");
    }
    for info in &comms.infos {
        assert!(!info.pv.is_empty());
        assert!(info.pv.len() <= 128);
    }
}

#[test]
fn test_single_legal_move_is_returned() {
    // Black king on h8 in check from the queen on g7 only has Kxg7 available
    let mut player = small_player();
    let mut state = GameState::from_fen("7k/6Q1/8/8/8/8/8/K7 b - - 0 1").unwrap();

    let result = player.search(&mut state, SearchLimits::Depth(3), &mut Silent);

    assert_eq!(result.root_moves, 1);
    assert_eq!(result.best_move.map(|mv| mv.to_string()), Some("h8g7".to_string()));
}

#[test]
fn test_finds_back_rank_mate() {
    let mut player = small_player();
    let mut state = GameState::from_fen("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1").unwrap();

    let result = player.search(&mut state, SearchLimits::Depth(4), &mut Silent);

    assert_eq!(result.best_move.map(|mv| mv.to_string()), Some("a1a8".to_string()));
    assert_eq!(result.score, mate_in(1));
}

#[test]
fn test_checkmated_and_stalemated_roots() {
    let mut player = small_player();

    let mut mated =
        GameState::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
            .unwrap();
    let result = player.search(&mut mated, SearchLimits::Depth(5), &mut Silent);
    assert_eq!(result.best_move, None);
    assert_eq!(result.score, mated_in(0));

    let mut stalemate = GameState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    let mut comms = Recorder::new();
    let result = player.search(&mut stalemate, SearchLimits::Depth(5), &mut comms);
    assert_eq!(result.best_move, None);
    assert_eq!(result.score, 0);
    assert_eq!(comms.depths(), vec![1]);
}

#[test]
fn test_stop_mid_iteration_keeps_last_completed_depth() {
    let mut pos = GameState::from_fen(KIWIPETE).unwrap();
    let mut tt = TranspositionTable::new(1 << 16);
    let mut history = HistoryTable::new();
    let mut comms = Recorder::stop_after(2);

    let result = iterative_deepening_search(
        &mut pos,
        &mut tt,
        &mut history,
        &SearchLimits::Depth(10),
        &EngineConfig::default(),
        &mut comms,
    );

    assert_eq!(comms.depths(), vec![1, 2]);
    assert!(comms.polls > 0);
    let last = comms.infos.last().unwrap();
    assert_eq!(result.depth, last.depth);
    assert_eq!(result.best_move, last.pv.first().copied());
    assert_eq!(result.score, last.score);
    assert_eq!(comms.best_move, result.best_move);
}

#[test]
fn test_zero_move_time_returns_a_move() {
    let mut player = small_player();
    let mut state = GameState::from_fen(KIWIPETE).unwrap();
    let mut comms = Recorder::new();

    let started = Instant::now();
    let result = player.search(&mut state, SearchLimits::MoveTime(Duration::ZERO), &mut comms);

    assert_eq!(comms.depths(), vec![1]);
    assert!(result.best_move.is_some());
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[test]
fn test_move_time_limit_is_respected() {
    let mut player = small_player();
    let mut state = GameState::from_fen(KIWIPETE).unwrap();

    let started = Instant::now();
    let result = player.search(
        &mut state,
        SearchLimits::MoveTime(Duration::from_millis(200)),
        &mut Silent,
    );

    assert!(result.best_move.is_some());
    assert!(result.depth >= 1);
    assert!(started.elapsed() < Duration::from_secs(3));
}

#[test]
fn test_new_game_clears_table() {
    let mut player = small_player();
    let state = GameState::from_fen(START_FEN).unwrap();

    assert!(player.best_move(&state).is_some());
    assert!(player.table().hashfull() > 0);

    player.new_game();
    assert_eq!(player.table().hashfull(), 0);
}

#[test]
fn test_difficulty_presets_search_to_their_depth() {
    let state = GameState::from_fen(START_FEN).unwrap();

    for difficulty in [Difficulty::Easy, Difficulty::Medium] {
        let mut player = NegamaxPlayer::with_config(
            EngineConfig {
                tt_entries: 1 << 16,
                ..EngineConfig::default()
            },
            difficulty,
        );
        let mut scratch = state.clone();
        let result = player.search(&mut scratch, difficulty.limits(), &mut Silent);

        assert_eq!(result.depth, difficulty.max_depth());
        assert!(result.best_move.is_some());
    }
}
