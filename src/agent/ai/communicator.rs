//! Channel between a running search and the outside world.
//!
//! The search never blocks on its communicator: `poll` is called every few
//! thousand nodes and must return immediately. Progress and the final move are
//! pushed through the same object so that front-ends can decide how to render
//! them.

use super::search::SearchInfo;
use chess::ChessMove;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub trait Communicator {
    /// Non-blocking check for an external stop. `true` stops the search.
    fn poll(&mut self) -> bool {
        false
    }

    /// Report of a completed iteration
    fn info(&mut self, _info: &SearchInfo) {}

    /// Root move about to be searched; `number` is 1-based
    fn current_move(&mut self, _depth: u8, _mv: ChessMove, _number: usize, _score: i32) {}

    /// Final decision of a root search
    fn best_move(&mut self, _mv: Option<ChessMove>) {}
}

/// Communicator that never stops and reports nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Communicator for Silent {}

/// Prints protocol lines to stdout and stops when the shared flag is raised
#[derive(Debug, Default, Clone)]
pub struct StdoutCommunicator {
    stop: Arc<AtomicBool>,
}

impl StdoutCommunicator {
    pub fn new(stop: Arc<AtomicBool>) -> Self {
        Self { stop }
    }

    fn emit(&self, line: std::fmt::Arguments<'_>) {
        let mut out = io::stdout().lock();
        // A closed stdout leaves nobody to report to
        let _ = writeln!(out, "{}", line);
        let _ = out.flush();
    }
}

impl Communicator for StdoutCommunicator {
    fn poll(&mut self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    fn info(&mut self, info: &SearchInfo) {
        self.emit(format_args!("{}", info));
    }

    fn current_move(&mut self, depth: u8, mv: ChessMove, number: usize, score: i32) {
        self.emit(format_args!(
            "info depth {} currmove {} currmovenumber {} currmovescore {}",
            depth, mv, number, score
        ));
    }

    fn best_move(&mut self, mv: Option<ChessMove>) {
        match mv {
            Some(mv) => self.emit(format_args!("bestmove {}", mv)),
            None => self.emit(format_args!("bestmove 0000")),
        }
    }
}

/// Keeps every report in memory; optionally requests a stop once an
/// iteration of a given depth has been reported.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    pub infos: Vec<SearchInfo>,
    /// Depth, move, 1-based number and displayed ordering score of each root move report
    pub current_moves: Vec<(u8, ChessMove, usize, i32)>,
    pub best_move: Option<ChessMove>,
    pub polls: u64,
    stop_after: Option<u8>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop the search as soon as it is polled after the report for `depth`
    pub fn stop_after(depth: u8) -> Self {
        Self {
            stop_after: Some(depth),
            ..Self::default()
        }
    }

    /// Depths of all reported iterations, in order
    pub fn depths(&self) -> Vec<u8> {
        self.infos.iter().map(|info| info.depth).collect()
    }
}

impl Communicator for Recorder {
    fn poll(&mut self) -> bool {
        self.polls += 1;
        match (self.stop_after, self.infos.last()) {
            (Some(limit), Some(last)) => last.depth >= limit,
            _ => false,
        }
    }

    fn info(&mut self, info: &SearchInfo) {
        self.infos.push(info.clone());
    }

    fn current_move(&mut self, depth: u8, mv: ChessMove, number: usize, score: i32) {
        self.current_moves.push((depth, mv, number, score));
    }

    fn best_move(&mut self, mv: Option<ChessMove>) {
        self.best_move = mv;
    }
}
