//! Sliding-tile puzzle solver
//!
//! Solves rectangular "fifteen" puzzles by placing tiles row by row from the
//! bottom, then column by column across the top two rows, and prints or
//! replays the resulting blank moves.

mod play;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::{rngs::StdRng, SeedableRng};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use fifteen::Puzzle;

/// Solves sliding-tile puzzles and replays the solutions.
#[derive(Parser)]
#[command(name = "fifteen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a grid given as rows of labels, e.g. "3 1 2; 6 4 5; 0 7 8".
    Solve {
        grid: String,
        /// Print the grid after every move.
        #[arg(long)]
        replay: bool,
    },
    /// Scramble a solved grid with a random walk, then solve it.
    Scramble {
        #[command(flatten)]
        scramble: ScrambleArgs,
        /// Print the grid after every move.
        #[arg(long)]
        replay: bool,
    },
    /// Play in the terminal: arrows move the blank, `s` solves.
    Play {
        #[command(flatten)]
        scramble: ScrambleArgs,
        /// Milliseconds between replayed solver moves.
        #[arg(long, default_value_t = 150)]
        tick_ms: u64,
    },
}

#[derive(Args, Clone, Copy)]
struct ScrambleArgs {
    /// Number of rows.
    #[arg(long, default_value_t = 4, value_parser = parse_dimension)]
    height: usize,
    /// Number of columns.
    #[arg(long, default_value_t = 4, value_parser = parse_dimension)]
    width: usize,
    /// Length of the scrambling random walk.
    #[arg(long, default_value_t = 200)]
    steps: usize,
    /// Seed for a reproducible scramble.
    #[arg(long)]
    seed: Option<u64>,
}

impl Default for ScrambleArgs {
    fn default() -> Self {
        Self {
            height: 4,
            width: 4,
            steps: 200,
            seed: None,
        }
    }
}

impl ScrambleArgs {
    fn scrambled(&self, rng: &mut StdRng) -> Puzzle {
        let mut puzzle = Puzzle::new(self.height, self.width);
        let walk = puzzle.shuffle(self.steps, rng);
        info!(
            height = self.height,
            width = self.width,
            steps = walk.len(),
            "scrambled puzzle"
        );
        puzzle
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

fn parse_dimension(s: &str) -> Result<usize, String> {
    let value: usize = s.parse().map_err(|_| format!("{s:?} is not a number"))?;
    if value < 2 {
        return Err("dimensions must be at least 2".to_string());
    }
    Ok(value)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Solve { grid, replay }) => {
            let puzzle: Puzzle = grid
                .parse()
                .with_context(|| format!("invalid grid {grid:?}"))?;
            run_solver(&puzzle, replay)
        }
        Some(Command::Scramble { scramble, replay }) => {
            let puzzle = scramble.scrambled(&mut scramble.rng());
            run_solver(&puzzle, replay)
        }
        Some(Command::Play { scramble, tick_ms }) => {
            let mut rng = scramble.rng();
            play::run(
                || scramble.scrambled(&mut rng),
                Duration::from_millis(tick_ms),
            )
            .context("terminal session failed")
        }
        None => {
            // default: scramble a 4x4 puzzle and show every step
            let scramble = ScrambleArgs::default();
            let puzzle = scramble.scrambled(&mut scramble.rng());
            run_solver(&puzzle, true)
        }
    }
}

/// Solves `puzzle`, prints the move string and optionally every step.
fn run_solver(puzzle: &Puzzle, replay: bool) -> Result<()> {
    println!("Initial Puzzle:\n{}", puzzle);

    let moves = fifteen::solve(puzzle)?;
    println!("Found solution with {} moves: {}", moves.len(), moves);

    if replay {
        let mut board = puzzle.clone();
        for &movement in &moves {
            board.apply_move(movement)?;
            println!("{}\n{}", movement, board);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_solve_command() {
        let cli = Cli::try_parse_from(["fifteen", "solve", "1 0; 2 3", "--replay"]).unwrap();
        match cli.command {
            Some(Command::Solve { grid, replay }) => {
                assert_eq!(grid, "1 0; 2 3");
                assert!(replay);
            }
            _ => panic!("expected solve command"),
        }
    }

    #[test]
    fn test_cli_rejects_small_dimensions() {
        assert!(Cli::try_parse_from(["fifteen", "scramble", "--height", "1"]).is_err());
    }

    #[test]
    fn test_seeded_scramble_is_reproducible() {
        let args = ScrambleArgs {
            seed: Some(5),
            ..ScrambleArgs::default()
        };
        assert_eq!(args.scrambled(&mut args.rng()), args.scrambled(&mut args.rng()));
    }
}
