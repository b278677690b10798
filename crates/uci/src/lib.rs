//! UCI (Universal Chess Interface) protocol vocabulary for engine clients.
//!
//! This crate provides the commands a GUI sends to an engine and the lines
//! an engine answers with, restricted to what a single-move query needs.
//!
//! # Commands sent to the engine
//!
//! - `isready` / `readyok` - Synchronization
//! - `setoption name <name> value <int>` - Configure the engine
//! - `position fen <fen> [moves <move>...]` - Set position
//! - `go movetime <ms>` - Start a bounded search
//! - `d` - Print the board diagram (Stockfish extension)
//! - `quit` - Exit engine
//!
//! # Lines read from the engine
//!
//! - `readyok` - Barrier acknowledgment
//! - `bestmove <move> ...` - Search result; only the move token is read
//! - `Fen: <fen>` - Position echo inside the `d` diagram
//! - `Checkers: <square>...` - Last line of the `d` diagram

mod command;
mod message;

pub use command::GuiCommand;
pub use message::{EngineMessage, BEST_MOVE_PREFIX, CHECKERS_PREFIX, FEN_PREFIX, READY_OK};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum UciError {
    #[error("Parse error: {0}")]
    ParseError(String),
}
