//! Reversi agent command line
//!
//! - `solve`: answer one move request from a position file
//! - `compete`: answer a clock-bound request with the move label only
//! - `play`: run a self-play game and write its timing log
//! - `view`: replay a logged game in a window

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use reversi::arena::{Arena, ArenaConfig};
use reversi::io::{read_competition, read_position, write_move, write_output, GameRecord};
use reversi::search::TracingObserver;
use reversi::ui::ReplayApp;
use reversi::{CompetitionAgent, ReversiAgent, SearchMode};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log more (-v debug, -vv every search node)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read a position file, pick a move and write the output file
    Solve {
        #[arg(short, long, default_value = "input.txt")]
        input: PathBuf,

        #[arg(short, long, default_value = "output.txt")]
        output: PathBuf,
    },

    /// Read a clock-bound request and write the chosen move
    Compete {
        #[arg(short, long, default_value = "input.txt")]
        input: PathBuf,

        #[arg(short, long, default_value = "output.txt")]
        output: PathBuf,

        /// Override the seconds left on the clock from the input file
        #[arg(short, long)]
        time: Option<f64>,
    },

    /// Play a full game between two agents
    Play {
        /// Cutoff depth for X
        #[arg(long, default_value_t = 3)]
        x_depth: u32,

        /// Cutoff depth for O
        #[arg(long, default_value_t = 3)]
        o_depth: u32,

        #[arg(short, long, value_enum, default_value_t = ModeArg::AlphaBeta)]
        mode: ModeArg,

        /// Where to write the per-move timing log
        #[arg(short, long, default_value = "gamelog.txt")]
        log: PathBuf,
    },

    /// Replay a game log
    View {
        #[arg(short, long, default_value = "gamelog.txt")]
        log: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    Greedy,
    Minimax,
    AlphaBeta,
}

impl From<ModeArg> for SearchMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Greedy => SearchMode::Greedy,
            ModeArg::Minimax => SearchMode::Minimax,
            ModeArg::AlphaBeta => SearchMode::AlphaBeta,
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn solve(input: PathBuf, output: PathBuf) -> anyhow::Result<()> {
    let params = read_position(&input)
        .with_context(|| format!("failed to load position from {}", input.display()))?;

    let mut agent = ReversiAgent::new(params);
    let outcome = agent.play_with_observer(&mut TracingObserver);

    write_output(&output, agent.board(), &outcome)
        .with_context(|| format!("failed to write {}", output.display()))?;

    match outcome.best_move {
        Some(pos) => println!("{pos}"),
        None => println!("pass"),
    }
    Ok(())
}

fn compete(input: PathBuf, output: PathBuf, time: Option<f64>) -> anyhow::Result<()> {
    let mut params = read_competition(&input)
        .with_context(|| format!("failed to load request from {}", input.display()))?;
    if let Some(secs) = time {
        params.time_remaining = Duration::try_from_secs_f64(secs)
            .with_context(|| format!("invalid --time {secs}"))?;
    }

    let result = CompetitionAgent::new(params).play();

    write_move(&output, result.best_move)
        .with_context(|| format!("failed to write {}", output.display()))?;

    match result.best_move {
        Some(pos) => println!("{pos}"),
        None => println!("pass"),
    }
    Ok(())
}

fn play(x_depth: u32, o_depth: u32, mode: SearchMode, log: PathBuf) -> anyhow::Result<()> {
    let config = ArenaConfig::new(mode, x_depth, o_depth).context("invalid self-play settings")?;
    let summary = Arena::new(config).play().context("self-play failed")?;

    summary
        .record
        .write(&log)
        .with_context(|| format!("failed to write game log {}", log.display()))?;
    info!(path = %log.display(), "game log written");

    print!("{}", summary.board);
    println!("{} {}", summary.x_discs, summary.o_discs);
    match summary.winner() {
        Some(player) => println!("{player} wins"),
        None => println!("draw"),
    }
    Ok(())
}

fn view(log: PathBuf) -> anyhow::Result<()> {
    let record = GameRecord::read(&log)
        .with_context(|| format!("failed to load game log {}", log.display()))?;
    record
        .final_board()
        .with_context(|| format!("game log {} does not replay", log.display()))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 800.0])
            .with_min_inner_size([700.0, 600.0])
            .with_title("Reversi Replay"),
        ..Default::default()
    };

    eframe::run_native(
        "Reversi Replay",
        options,
        Box::new(|cc| Ok(Box::new(ReplayApp::new(cc, record)?))),
    )
    .map_err(|e| anyhow!("replay viewer failed: {e}"))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    match args.command {
        Command::Solve { input, output } => solve(input, output),
        Command::Compete {
            input,
            output,
            time,
        } => compete(input, output, time),
        Command::Play {
            x_depth,
            o_depth,
            mode,
            log,
        } => play(x_depth, o_depth, mode.into(), log),
        Command::View { log } => view(log),
    }
}
