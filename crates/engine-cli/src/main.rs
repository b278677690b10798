//! stockfish-cli - Ask a UCI chess engine about a position.
//!
//! Each invocation starts the engine, runs one query, prints the answer on
//! stdout and shuts the engine down. Logs go to stderr; set `RUST_LOG=debug`
//! to see every protocol line.

use anyhow::Context;
use clap::{Parser, Subcommand};
use engine_session::{EngineOption, EngineSession, EngineSettings};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Query a UCI chess engine from the command line.
#[derive(Parser, Debug)]
#[command(name = "stockfish-cli")]
#[command(about = "Query a UCI chess engine from the command line")]
struct Cli {
    /// Path to the settings file
    #[arg(long, default_value = "stockfish.toml")]
    config: PathBuf,

    /// Engine executable (overrides platform/variant selection)
    #[arg(long)]
    engine: Option<PathBuf>,

    /// Engine option as NAME=VALUE, e.g. "Skill Level=5". Repeatable.
    #[arg(short = 'o', long = "option")]
    options: Vec<EngineOption>,

    /// Think time in milliseconds for best-move
    #[arg(long)]
    movetime: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// Print the engine's best move for a position
    BestMove {
        /// Position in FEN notation
        fen: String,
        /// Skill level (0-20)
        #[arg(short, long, default_value = "20")]
        difficulty: i32,
    },
    /// Print the squares of pieces giving check
    Checkers {
        /// Position in FEN notation
        fen: String,
    },
    /// Print the engine's current position
    Fen,
    /// Play moves from a position and print the resulting FEN
    Apply {
        /// Position in FEN notation
        fen: String,
        /// Moves in UCI notation (e.g. e2e4 e7e5)
        #[arg(required = true)]
        moves: Vec<String>,
    },
    /// Check that the engine starts and stays running
    Alive,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = EngineSettings::load_from(&cli.config)
        .with_context(|| format!("Failed to load settings from {}", cli.config.display()))?;
    if let Some(engine) = cli.engine {
        settings.executable = Some(engine);
    }
    if let Some(movetime) = cli.movetime {
        settings.movetime_ms = movetime;
    }

    tracing::info!("Engine: {}", settings.executable_path().display());

    let mut session = EngineSession::new(&settings, &cli.options)?;
    let result = run(&mut session, cli.command);

    // Shut down even when the query failed, but report the query's error first
    let shutdown = session.shutdown();
    result?;
    shutdown?;
    Ok(())
}

fn run(session: &mut EngineSession, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::BestMove { fen, difficulty } => {
            let mv = session.best_move(&fen, difficulty)?;
            if mv.is_empty() {
                tracing::warn!("Engine returned no move");
            }
            println!("{}", mv);
        }
        Commands::Checkers { fen } => {
            let checkers = session.checkers(&fen)?;
            println!("{}", checkers.join(" "));
        }
        Commands::Fen => {
            println!("{}", session.current_position()?);
        }
        Commands::Apply { fen, moves } => {
            println!("{}", session.apply_move(&fen, &moves.join(" "))?);
        }
        Commands::Alive => {
            let alive = session.is_alive();
            println!("{}", if alive { "alive" } else { "dead" });
            if !alive {
                anyhow::bail!("Engine {} is not running", session.executable().display());
            }
        }
    }
    Ok(())
}
