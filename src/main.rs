// Command line front-end: search one position and print protocol lines

use anyhow::{Context, Result};
use chess_search::agent::ai::{
    Difficulty, EngineConfig, NegamaxPlayer, SearchLimits, StdoutCommunicator,
};
use chess_search::game_repr::{GameState, START_FEN};
use clap::Parser;
use std::io::Write;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about = "Alpha-beta chess search", long_about = None)]
struct Args {
    /// Position to search
    #[arg(long, default_value = START_FEN)]
    fen: String,

    /// Moves played from the position, in coordinate notation ("e2e4 e7e5")
    #[arg(long, num_args = 1.., value_delimiter = ' ')]
    moves: Vec<String>,

    /// Fixed search depth in plies
    #[arg(long)]
    depth: Option<u8>,

    /// Fixed search time in milliseconds
    #[arg(long)]
    movetime: Option<u64>,

    /// White's remaining clock in milliseconds
    #[arg(long)]
    wtime: Option<u64>,

    /// Black's remaining clock in milliseconds
    #[arg(long)]
    btime: Option<u64>,

    /// White's increment in milliseconds
    #[arg(long, default_value_t = 0)]
    winc: u64,

    /// Black's increment in milliseconds
    #[arg(long, default_value_t = 0)]
    binc: u64,

    /// Transposition table size in megabytes
    #[arg(long, default_value_t = 16)]
    hash: usize,

    /// Preset used when no depth or time is given (easy, medium, hard, expert)
    #[arg(long, default_value = "medium")]
    difficulty: Difficulty,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

impl Args {
    fn limits(&self) -> SearchLimits {
        let ms = Duration::from_millis;

        match (self.depth, self.movetime, self.wtime, self.btime) {
            (Some(depth), Some(time), _, _) => SearchLimits::DepthAndTime(depth, ms(time)),
            (Some(depth), None, _, _) => SearchLimits::Depth(depth),
            (None, Some(time), _, _) => SearchLimits::MoveTime(ms(time)),
            (None, None, Some(wtime), Some(btime)) => SearchLimits::Clock {
                wtime: ms(wtime),
                btime: ms(btime),
                winc: ms(self.winc),
                binc: ms(self.binc),
            },
            _ => self.difficulty.limits(),
        }
    }
}

fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "info" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| {
            writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args())
        })
        .target(env_logger::Target::Stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let mut state = GameState::from_fen(&args.fen).context("cannot set up the position")?;
    for text in &args.moves {
        let mv = state
            .parse_move(text)
            .with_context(|| format!("cannot replay move list at '{}'", text))?;
        state.push_move(mv)?;
    }

    let config = EngineConfig::default().with_hash_mb(args.hash);
    let mut player = NegamaxPlayer::with_config(config, args.difficulty);
    // No stdin reader: the search ends on its limits only
    let mut comms = StdoutCommunicator::default();

    let limits = args.limits();
    log::info!("{} searching with {:?}", player.name(), limits);

    player.search(&mut state, limits, &mut comms);

    Ok(())
}
