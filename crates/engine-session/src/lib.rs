//! Synchronous client for UCI chess engines such as Stockfish.
//!
//! This crate drives an engine running as a child process and answers four
//! questions about chess positions: the best move, the pieces giving check,
//! the engine's canonical FEN, and the FEN after playing moves.
//!
//! # Overview
//!
//! - [`EngineSession`] - One engine process and the UCI exchanges with it
//! - [`ChessEngine`] - The operations as a trait, for callers that abstract over engines
//! - [`LineChannel`] - The line-based connection a session talks through
//! - [`EngineSettings`] - Binary selection and defaults from `stockfish.toml`
//! - [`SessionError`] - Initialization, protocol, and shutdown failures
//!
//! # Example
//!
//! ```no_run
//! use engine_session::{EngineOption, EngineSession, EngineSettings};
//!
//! let settings = EngineSettings::load()?;
//! let mut session = EngineSession::new(&settings, &[EngineOption::skill_level(5)])?;
//! let fen = session.apply_move("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", "e2e4")?;
//! println!("{}", fen);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod channel;
pub mod config;
pub mod engine;
pub mod error;
pub mod executable;
pub mod option;
pub mod response;
pub mod session;

pub use channel::{LineChannel, ProcessChannel};
pub use config::{ConfigError, EngineSettings};
pub use engine::ChessEngine;
pub use error::{ProtocolError, SessionError};
pub use option::EngineOption;
pub use response::{ResponseBuffer, Terminator};
pub use session::{EngineSession, SessionState};
